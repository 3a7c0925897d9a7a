//! Basic receiver control
//!
//! Usage: `cargo run --example basic_usage -- <host> [menu path]`
//!
//! Set `RECEIVER_LOG_MODE=development` to see request logging.

use yamaha_sdk::logging::init_logging_from_env;
use yamaha_sdk::{Receiver, ReceiverConfig, SdkError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging_from_env()?;

    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "192.168.1.20".to_string());
    let path = args.next();

    let receiver = Receiver::new(ReceiverConfig::new(host))?;
    receiver.refresh();

    println!("Receiver:  {}", receiver.name());
    println!("Power:     {:?}", receiver.power());
    println!("State:     {:?}", receiver.media_state());
    println!("Volume:    {:.0}%", receiver.volume() * 100.0);
    println!("Source:    {}", receiver.source().unwrap_or_else(|| "-".to_string()));
    println!("Sources:   {}", receiver.source_list().join(", "));
    if let Some(title) = receiver.media_title() {
        println!("Title:     {}", title);
    }
    if let Some(artist) = receiver.media_artist() {
        println!("Artist:    {}", artist);
    }

    if let Some(path) = path {
        match receiver.play_path(&path) {
            Ok(outcome) => println!("Reached {} after {} polls", path, outcome.attempts),
            Err(SdkError::NavigationExhausted { segment, layer, .. }) => {
                println!("Could not find {:?} at layer {}", segment, layer)
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
