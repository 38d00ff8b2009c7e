//! Session commands: login, register, logout, whoami, profile update.

use flyercraft_client::session::{ProfileDraft, RegisterOutcome, SessionManager};

use super::CliError;

pub async fn login(
    session: &SessionManager,
    email: &str,
    password: &str,
) -> Result<(), CliError> {
    let user = session.login(email, password).await?;
    println!("Signed in as {} <{}>", user.full_name(), user.email);
    Ok(())
}

pub async fn register(
    session: &SessionManager,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<(), CliError> {
    match session.register(first_name, last_name, email, password).await? {
        RegisterOutcome::SignedIn(user) => {
            println!("Account created; signed in as {}", user.full_name());
        }
        RegisterOutcome::VerificationPending(user) => {
            println!(
                "Account created for {}; verify it before signing in",
                user.email
            );
        }
    }
    Ok(())
}

pub fn logout(session: &SessionManager) {
    session.logout();
    println!("Signed out");
}

pub fn whoami(session: &SessionManager) {
    match session.current_user() {
        Some(user) => println!("{} <{}> ({})", user.full_name(), user.email, user.id),
        None => println!("Not signed in"),
    }
}

/// Update the profile. Unset fields keep their current value; the draft is
/// seeded from the cached user so the backend always receives a complete
/// record.
pub async fn update_profile(
    session: &SessionManager,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
) -> Result<(), CliError> {
    let current = session.current_user().ok_or(CliError::NotSignedIn)?;

    let draft = ProfileDraft {
        first_name: first_name.unwrap_or(current.first_name),
        last_name: last_name.unwrap_or(current.last_name),
        email: email.unwrap_or_else(|| current.email.as_str().to_owned()),
    };

    let updated = session.update_profile(&draft).await?;
    println!("Profile updated: {} <{}>", updated.full_name(), updated.email);
    Ok(())
}
