use plaindb::Database;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut db_path = std::env::temp_dir();
    db_path.push("plaindb_demo.db");
    std::fs::write(
        &db_path,
        "#Demo database\n[net]\n\t$host=localhost\n\t$port=8080\n",
    )?;

    let mut db = Database::new(&db_path);
    println!("Parsed {}: {}\n", db_path.display(), db.is_parsed());

    println!("net/host: {}", db.get_var("net", "host").unwrap_or("<missing>"));
    println!("net/port: {}", db.get_var("net", "port").unwrap_or("<missing>"));

    db.change_var_value("net", "port", "9090")?;
    db.create_section("net/proxy")?;
    db.create_var("net/proxy", "address", "10.0.0.1")?;
    db.declare_var("net/proxy", "user")?;
    db.add_comment("edited by the demo")?;

    if let Err(e) = db.create_var("missing/section", "x", "1") {
        println!("Expected failure: {}", e);
    }

    let mut copy_path = PathBuf::from(&db_path);
    copy_path.set_extension("copy.db");
    db.save_as(&copy_path)?;
    db.apply_changes()?;

    println!("\nResult:\n{}", db.serialize());
    Ok(())
}
