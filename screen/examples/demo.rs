//! Display and brightness demo.
use statkit_screen::{brightness, display_size, set_brightness};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("statkit screen demo");

    let size = display_size()?;
    println!("Display: {}x{} points", size.width, size.height);

    match brightness() {
        Ok(level) => {
            println!("Current brightness: {:.2}", level.value());
            // Write the same level back so the panel does not change.
            if let Err(e) = set_brightness(level.value()) {
                println!("Failed to set brightness: {e}");
            } else {
                println!("Brightness set successfully.");
            }
        }
        Err(e) => println!("Failed to get brightness: {e}"),
    }

    Ok(())
}
