//! `rfp chat` command - canned pipeline assistant

use console::style;
use miette::Result;

use crate::assistant::{Assistant, ChatContext};
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct ChatArgs {
    /// Screen the question is asked from
    #[arg(long, short = 'c', value_enum, default_value = "general")]
    pub context: ChatContext,

    /// Question; prints the welcome message when omitted
    pub message: Vec<String>,
}

pub fn run(args: ChatArgs, global: &GlobalOpts) -> Result<()> {
    let message = args.message.join(" ");
    let assistant = Assistant::new()?;

    match assistant.respond(args.context, &message)? {
        Some(reply) => println!("{}", reply),
        None => {
            if !global.quiet {
                println!(
                    "{} {}",
                    style(format!("[{} Expert]", args.context.title())).cyan().bold(),
                    args.context.welcome_message()
                );
            }
        }
    }
    Ok(())
}
