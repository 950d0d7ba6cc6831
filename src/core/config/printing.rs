use crate::core::config::data::{path_display, Config, DEFAULT_ENDPOINT};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.endpoint {
            Some(endpoint) => println!("  endpoint: {endpoint}"),
            None => println!("  endpoint: (unset, default {DEFAULT_ENDPOINT})"),
        }
        match &self.catalog {
            Some(path) => println!("  catalog: {}", path_display(path)),
            None => println!("  catalog: (built-in)"),
        }
        println!("  scroll-threshold: {}", self.scroll_threshold());
        match self.request_timeout() {
            Some(timeout) => println!("  request-timeout: {}s", timeout.as_secs()),
            None => println!("  request-timeout: (none)"),
        }
        println!("  grid-columns: {}", self.grid_columns());
    }
}
