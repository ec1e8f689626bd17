use inipatch::Config;
use std::fs;

const ORIGINAL: &str = "\
; display settings, edited by hand
[window]
width  = 1024   ; pixels
height = 768
fullscreen = no

[audio]
volume = 0.8
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join("inipatch_demo.ini");
    fs::write(&path, ORIGINAL)?;

    let mut config = Config::load(&path)?;
    println!("Loaded {}\n", path.display());

    let width = config.get_int("window", "width");
    let fullscreen = config.get_bool("window", "fullscreen");
    let volume = config.get_float("audio", "volume");

    println!("Width: {}", width);
    println!("Fullscreen?: {}", fullscreen);
    println!("Volume: {}", volume);

    config.set("window", "width", 1920);
    config.set("window", "vsync", true);
    config.set("network", "port", 7777);
    config.save(&path)?;

    println!("\nAfter save:\n{}", fs::read_to_string(&path)?);

    fs::remove_file(&path)?;
    Ok(())
}
