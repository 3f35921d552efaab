use crate::{error::Result, logging};

use super::Bot;

pub async fn show_log(bot: &Bot, limit: Option<i64>) -> Result<()> {
    for line in logging::read_log(&bot.settings.log_file, limit).await? {
        println!("{line}");
    }
    Ok(())
}
