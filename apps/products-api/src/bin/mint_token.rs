//! Issue an access/refresh token pair signed with `JWT_SECRET`.
//!
//! The API only verifies tokens; credentials live elsewhere. This is the
//! operator's way to hand out a pair for a known subject.
//!
//! ```text
//! JWT_SECRET=... mint-token alice
//! ```

use axum_helpers::{JwtAuth, JwtConfig};
use clap::Parser;
use core_config::FromEnv;
use core_config::tracing::install_color_eyre;

#[derive(Parser)]
#[command(name = "mint-token")]
#[command(about = "Issue a bearer token pair for the Products API")]
struct Cli {
    /// Subject (`sub` claim) the tokens are issued for
    subject: String,

    /// Print only the access token
    #[arg(short, long)]
    access_only: bool,
}

fn main() -> eyre::Result<()> {
    install_color_eyre();
    let cli = Cli::parse();

    let config = JwtConfig::from_env()?;
    let auth = JwtAuth::new(&config);

    if cli.access_only {
        println!("{}", auth.issue_access_token(&cli.subject)?);
    } else {
        let pair = auth.issue_pair(&cli.subject)?;
        println!("{}", serde_json::to_string_pretty(&pair)?);
    }

    Ok(())
}
