use poise::{builtins, FrameworkError};
use tracing::error;

use crate::{state::Data, Error};

pub async fn global_error_handler(e: FrameworkError<'_, Data, Error>) {
    match e {
        FrameworkError::Setup { framework, error, .. } => {
            error!("Bot setup failed: {error:?}");
            framework.shard_manager().shutdown_all().await;
        }
        FrameworkError::Command { error, ctx, .. } => {
            error!(
                "Command {} failed: {error:?}",
                ctx.command().qualified_name
            );
            if let Err(failure) = ctx.say(format!("An error has occurred: {error}")).await {
                error!("Bot could not report the error to the channel: {failure}");
            }
        }
        e => {
            if let Err(e) = builtins::on_error(e).await {
                error!("Error from the error handler: {e:?}");
            }
        }
    }
}
