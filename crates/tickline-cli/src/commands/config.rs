use tickline_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            api_base_url,
            no_activate,
        } => run_config_init(
            profile.as_deref().or(global_profile),
            api_base_url,
            no_activate,
        ),
        ConfigCommands::Show { profile } => {
            run_config_show(profile.as_deref().or(global_profile))
        }
    }
}

fn run_config_init(
    profile_name: Option<&str>,
    api_base_url: Option<String>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);

    let merged_api_base_url = normalize_text_option(api_base_url)
        .or_else(|| normalize_text_option(std::env::var("TICKLINE_API_BASE_URL").ok()))
        .or_else(|| {
            config
                .profile(&profile_name)
                .and_then(|existing| normalize_text_option(existing.api_base_url.clone()))
        });

    let profile = config.profile_mut_or_default(&profile_name);
    if let Some(url) = merged_api_base_url {
        profile.api_base_url = Some(url);
    }
    profile.validate().map_err(CliError::Config)?;
    let configured = profile.api_base_url.is_some();

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );
    if configured {
        println!(
            "Profile '{profile_name}' is ready. Run `tickline auth login --email <email> --password <password>`."
        );
    } else {
        println!("Profile '{profile_name}' is missing: api_base_url");
    }
    Ok(())
}

fn run_config_show(profile_name: Option<&str>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    let profile = config.profile(&profile_name).cloned().unwrap_or_default();

    println!("Profile:      {profile_name}");
    println!(
        "API base URL: {}",
        profile
            .api_base_url()
            .as_deref()
            .unwrap_or("(not configured)")
    );
    println!(
        "Active:       {}",
        config.active_profile.as_deref() == Some(profile_name.as_str())
    );
    Ok(())
}
