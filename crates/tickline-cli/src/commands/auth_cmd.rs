use tickline_core::auth::SessionPersistence;

use crate::cli::AuthCommands;
use crate::commands::common::ProfileContext;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;
use crate::session_store::SessionStore;

pub async fn run_auth(command: AuthCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        AuthCommands::Login {
            profile,
            email,
            password,
        } => {
            let context = ProfileContext::resolve(global_profile, profile.as_deref())?;
            let session = context
                .auth_client()?
                .sign_in(&email, &password)
                .await?;
            println!(
                "Signed in profile '{}' as {}",
                context.profile_name,
                session.profile.display_label()
            );
            Ok(())
        }
        AuthCommands::Status { profile } => {
            // Status works without a configured base URL; it only reads the store.
            let config = CliProfilesConfig::load()
                .map_err(CliError::Config)?;
            let profile_name = config.resolve_profile_name(profile.as_deref().or(global_profile));
            let store = SessionStore::for_profile(&profile_name);

            match store.load_session()? {
                Some(session) => println!(
                    "Profile '{}' is signed in as {} (user_id={})",
                    profile_name,
                    session.profile.display_label(),
                    session.profile.user_id
                ),
                None => println!("Profile '{profile_name}' is not signed in."),
            }
            Ok(())
        }
        AuthCommands::Logout { profile } => {
            match ProfileContext::resolve(global_profile, profile.as_deref()) {
                Ok(context) => {
                    context.auth_client()?.sign_out().await?;
                    println!("Signed out profile '{}'", context.profile_name);
                }
                Err(CliError::ApiNotConfigured) => {
                    // No backend to notify; still clear the local session.
                    let config = CliProfilesConfig::load()
                        .map_err(CliError::Config)?;
                    let profile_name =
                        config.resolve_profile_name(profile.as_deref().or(global_profile));
                    SessionStore::for_profile(&profile_name).clear_session()?;
                    println!("Signed out profile '{profile_name}' (local only)");
                }
                Err(error) => return Err(error),
            }
            Ok(())
        }
    }
}
