//! Recent activity command

use super::{CliContext, CliResult};
use crate::display::format_activity_feed;

pub async fn handle_activity_command(ctx: &CliContext, limit: Option<usize>) -> CliResult<()> {
    ctx.require_login()?;
    let entries = ctx.client.activities().recent(limit).await?;
    print!("{}", format_activity_feed(&entries));
    Ok(())
}
