// principles.rs - `grt principles`: print the catalog.

pub fn execute(json: bool) -> anyhow::Result<()> {
    let principles = grt_catalog::all();

    if json {
        println!("{}", serde_json::to_string_pretty(principles)?);
        return Ok(());
    }

    println!("{:<16} {:<16} DESCRIPTION", "ID", "NAME");
    for p in principles {
        println!("{:<16} {:<16} {}", p.id, p.name, p.description);
    }
    Ok(())
}
