//! huddle - fantasy football community forum CLI
//!
//! Register members, publish flaired posts, comment, and browse the forum
//! through the same JSON payloads a web transport would serve.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create the data directory and default config
//! huddle init
//!
//! # Register and post
//! huddle user register alice alice@example.com   # prompts for a password
//! HUDDLE_PASSWORD=... huddle post new --as alice --title "Waiver targets" --flair waiver_wire --content "..."
//!
//! # Read the JSON API
//! huddle api posts --flair WAIVER_WIRE --page 1
//! huddle --metrics api stats
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
