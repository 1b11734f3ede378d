use super::{QueryArgs, RangeArgs};
use crate::calendar::CalendarClient;
use crate::config::Config;
use crate::error::CalResult;
use chrono::{Duration, Local, NaiveDate};
use reqwest::Client;
use std::collections::BTreeMap;
use tracing::info;

/// List today's matching events
pub async fn today(config: &Config, session: Client, args: QueryArgs) -> CalResult<()> {
    let client = CalendarClient::from_config(config, Some(session));
    let (item_id, limit) = resolve(config, &args);

    let titles = client.get_todays_items(item_id, limit).await?;
    info!("{} matching events today", titles.len());

    print!("{}", format_day(Local::now().date_naive(), &titles));
    Ok(())
}

/// List tomorrow's matching events
pub async fn tomorrow(config: &Config, session: Client, args: QueryArgs) -> CalResult<()> {
    let client = CalendarClient::from_config(config, Some(session));
    let (item_id, limit) = resolve(config, &args);

    let titles = client.get_tomorrows_items(item_id, limit).await?;
    info!("{} matching events tomorrow", titles.len());

    print!(
        "{}",
        format_day(Local::now().date_naive() + Duration::days(1), &titles)
    );
    Ok(())
}

/// List the year's matching events grouped by date
pub async fn year(config: &Config, session: Client, args: QueryArgs) -> CalResult<()> {
    let client = CalendarClient::from_config(config, Some(session));
    let (item_id, limit) = resolve(config, &args);

    let grouped = client.get_the_years_items(item_id, limit).await?;
    info!("matching events on {} days this year", grouped.len());

    print!("{}", format_year(&grouped));
    Ok(())
}

/// Dump the raw JSON payload for a date range
pub async fn range(config: &Config, session: Client, args: RangeArgs) -> CalResult<()> {
    let client = CalendarClient::from_config(config, Some(session));
    let (item_id, limit) = resolve(config, &args.query);

    let body = client.get_items(args.from, args.to, item_id, limit).await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

/// Fall back to config values for flags the user left off
fn resolve(config: &Config, args: &QueryArgs) -> (u32, u32) {
    (
        args.item_id.unwrap_or(config.item_id),
        args.limit.unwrap_or(config.limit),
    )
}

/// Format one day's titles as a bulleted list under a date header
fn format_day(date: NaiveDate, titles: &[String]) -> String {
    let mut message = format!("{}:\n", date.format("%A, %B %d"));

    if titles.is_empty() {
        message.push_str("  (no events)\n");
    } else {
        for title in titles {
            message.push_str(&format!("  • {}\n", title));
        }
    }

    message
}

/// Format the year view with one header per date
fn format_year(grouped: &BTreeMap<NaiveDate, Vec<String>>) -> String {
    if grouped.is_empty() {
        return "(no events)\n".to_string();
    }

    let mut message = String::new();
    for (date, titles) in grouped {
        message.push_str(&format!("{}:\n", date.format("%Y-%m-%d")));
        for title in titles {
            message.push_str(&format!("  • {}\n", title));
        }
    }

    message
}
