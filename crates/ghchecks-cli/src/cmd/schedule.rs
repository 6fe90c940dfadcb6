use crate::output::print_json;
use chrono::Utc;
use ghchecks_core::schedule::Schedule;

pub fn run(count: usize, json: bool) -> anyhow::Result<()> {
    let schedule = Schedule::working_hours();
    let firings = schedule.next_firings(Utc::now(), count);

    if json {
        print_json(&serde_json::json!({
            "expression": schedule.expression(),
            "next": firings,
        }))?;
        return Ok(());
    }

    println!("Schedule: {}", schedule.expression());
    if firings.is_empty() {
        println!("Next firings: (none)");
    } else {
        println!("Next firings (UTC):");
        for t in &firings {
            println!("  {}", t.format("%a %Y-%m-%d %H:%M"));
        }
    }
    Ok(())
}
