use parcelkit::{estimate_field, Result};
use std::env;
use std::fs;
use std::process;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        eprintln!("Usage: parcelkit <field.tif> <boundary-file>");
        eprintln!();
        eprintln!("Boundary formats: .geojson/.json, .csv/.tsv/.txt, .shp, .zip");
        process::exit(2);
    }

    let raster = fs::read(&args[1])?;
    let boundary = fs::read(&args[2])?;

    let estimate = estimate_field(&raster, &args[2], &boundary)?;
    println!("{}", estimate);

    Ok(())
}
