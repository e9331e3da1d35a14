//! rTaskTracker main entrypoint.

use rtasktracker::run;
use rtasktracker::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
