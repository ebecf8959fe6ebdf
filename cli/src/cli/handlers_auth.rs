// cli/src/cli/handlers_auth.rs
use anyhow::Result;

use client::commands::LoginCommand;
use client::session_store::SessionStore;
use clinical_access::workflow::AccessWorkflow;

pub async fn handle_login(workflow: &mut AccessWorkflow, kind: LoginCommand) -> Result<()> {
    let (session, route) = match kind {
        LoginCommand::Patient {
            patient_id,
            password,
        } => workflow.sign_in_patient(&patient_id, &password).await?,
        LoginCommand::Staff { user_id, password } => {
            workflow.sign_in_staff(&user_id, &password).await?
        }
    };

    println!("Signed in as {} ({})", session.user_id, session.role);
    if let Some(name) = &session.full_name {
        println!("  name:    {}", name);
    }
    println!("  landing: {}", route);
    println!("  expires: {}", session.expires_at.to_rfc3339());
    if !session.allowed_purposes.is_empty() {
        let mut purposes: Vec<&str> = session
            .allowed_purposes
            .iter()
            .map(|p| p.as_str())
            .collect();
        purposes.sort_unstable();
        println!("  purposes: {}", purposes.join(", "));
    }
    Ok(())
}

pub async fn handle_logout(workflow: &mut AccessWorkflow) -> Result<()> {
    workflow.sign_out().await?;
    println!("Signed out.");
    Ok(())
}

pub async fn handle_whoami(sessions: &SessionStore) -> Result<()> {
    match sessions.current().await {
        Some(session) => {
            println!("{} ({})", session.user_id, session.role);
            println!("  session: {}", session.session_id);
            println!("  expires: {}", session.expires_at.to_rfc3339());
        }
        None => println!("Not signed in."),
    }
    Ok(())
}
