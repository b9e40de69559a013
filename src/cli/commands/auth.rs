//! `rfp auth` command - mock sign-in and session management

use clap::Subcommand;
use console::style;
use dialoguer::{Input, Password};
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::{print_structured, Workspace};
use crate::cli::GlobalOpts;
use crate::core::{AuthService, FileStorage, SignupRequest, User};

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Sign in with email and password
    Login(LoginArgs),

    /// Register a new account; it becomes active on first login
    Signup(SignupArgs),

    /// Sign in with the Google demo account
    Google,

    /// Sign out and discard any pending signup
    Logout,

    /// Show the signed-in user
    Whoami,
}

#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Password (prompted when omitted)
    #[arg(long, env = "RFP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SignupArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long, short = 'e')]
    pub email: String,

    #[arg(long)]
    pub company: Option<String>,

    /// Password (prompted when omitted)
    #[arg(long, env = "RFP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

pub fn run(cmd: AuthCommands, global: &GlobalOpts) -> Result<()> {
    let workspace = Workspace::open(global);
    let mut auth = AuthService::new(FileStorage::new(workspace.config.session_file()));
    let format = workspace.format(global);

    match cmd {
        AuthCommands::Login(args) => {
            let email = match args.email {
                Some(email) => email,
                None => Input::<String>::new()
                    .with_prompt("Email")
                    .interact_text()
                    .into_diagnostic()?,
            };
            let password = read_password(args.password, false)?;
            let user = auth.login(&email, &password)?;
            signed_in(&user, global);
        }
        AuthCommands::Signup(args) => {
            let password = read_password(args.password, true)?;
            let pending = auth.signup(SignupRequest {
                first_name: args.first_name,
                last_name: args.last_name,
                email: args.email,
                password,
                company: args.company,
            })?;
            if !global.quiet {
                println!(
                    "{} Account created for {}. Sign in with {}",
                    style("✓").green(),
                    style(&pending.email).cyan(),
                    style("rfp auth login").yellow()
                );
            }
        }
        AuthCommands::Google => {
            let user = auth.google_login()?;
            signed_in(&user, global);
        }
        AuthCommands::Logout => {
            auth.logout()?;
            if !global.quiet {
                println!("{} Signed out", style("✓").green());
            }
        }
        AuthCommands::Whoami => match auth.current_user()? {
            Some(user) => {
                if !print_structured(&user, format)? {
                    print_user(&user);
                }
            }
            None => {
                println!("Not signed in");
            }
        },
    }
    Ok(())
}

fn read_password(given: Option<String>, confirm: bool) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }
    let mut prompt = Password::new();
    prompt = prompt.with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    prompt.interact().into_diagnostic()
}

fn signed_in(user: &User, global: &GlobalOpts) {
    if !global.quiet {
        println!(
            "{} Signed in as {} ({})",
            style("✓").green(),
            style(user.full_name()).cyan(),
            user.role
        );
    }
}

fn print_user(user: &User) {
    println!("{:<10} {}", style("Name").dim(), user.full_name());
    println!("{:<10} {}", style("Email").dim(), user.email);
    println!("{:<10} {}", style("Role").dim(), user.role);
    if let Some(company) = &user.company {
        println!("{:<10} {}", style("Company").dim(), company);
    }
    if let Some(last_login) = user.last_login {
        println!(
            "{:<10} {}",
            style("Last login").dim(),
            last_login.format("%Y-%m-%d %H:%M UTC")
        );
    }
}
