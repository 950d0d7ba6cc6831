use super::{AppAction, AppCommand};
use crate::core::app::App;

pub(super) fn handle_catalog_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    let view = app.catalog_view_mut()?;

    match action {
        AppAction::CatalogMoveLeft => view.move_left(),
        AppAction::CatalogMoveRight => view.move_right(),
        AppAction::CatalogMoveUp => view.move_up(),
        AppAction::CatalogMoveDown => view.move_down(),
        AppAction::CatalogSelect { id } => view.select(id),
        AppAction::CatalogToggleCursor => view.select_cursor(),
        AppAction::CatalogCollapse => view.collapse(),
        AppAction::StartRoleplay => {
            let route = view.expanded().map(|id| view.proceed_to_chat(id))?;
            return app.navigate(route);
        }
        _ => unreachable!("non-catalog action routed to catalog handler"),
    }
    None
}
