use anyhow::Result;
use growpod_core::config::GrowPodConfig;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config_path = GrowPodConfig::config_path()?;
    let config = GrowPodConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Data:       {}", GrowPodConfig::data_dir()?.display());
    println!("  Google:     {}", growpod_google::base_dir()?.display());

    println!("\n{}", "Server".bold());
    println!("  URL:        {}", config.server_url()?);
    println!("  Timeout:    {}s", config.request_timeout_secs);

    println!("\n{}", "Google".bold());
    match &config.google {
        Some(google) => {
            println!("  Client ID:  {}", google.client_id);
            println!("  Redirect:   http://localhost:{}/callback", google.redirect_port);
        }
        None => println!("  {}", "not configured".dimmed()),
    }

    Ok(())
}
