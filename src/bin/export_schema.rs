use std::path::PathBuf;

use estimate_calc::schema;
use estimate_calc::settings;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  env_logger::init();

  let config_dir = settings::resolve_config_dir()?;
  let calc_settings = settings::load_settings(&config_dir);

  let output = std::env::args()
    .nth(1)
    .map(PathBuf::from)
    .unwrap_or_else(|| config_dir.join(&calc_settings.schema_file));

  if let Some(parent) = output.parent() {
    if !parent.as_os_str().is_empty() {
      std::fs::create_dir_all(parent)?;
    }
  }

  let json = schema::export_json(calc_settings.representation)?;
  std::fs::write(&output, json)?;

  println!(
    "Interface schema ({} operations) written to {}",
    schema::OPERATIONS.len(),
    output.display()
  );
  Ok(())
}
