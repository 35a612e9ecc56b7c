pub fn print_help() {
    println!("\n🥤 Smoothie Order Commands:");
    println!("  menu               - List the fruit options");
    println!("  name <text>        - Set the name on the smoothie");
    println!("  add <fruit|number> - Add an ingredient (up to 5)");
    println!("  remove <fruit>     - Remove an ingredient");
    println!("  clear              - Remove all ingredients");
    println!("  show               - Show nutrition for the chosen fruits");
    println!("  order              - Submit the order");
    println!();

    println!("⚙️ System Commands:");
    println!("  help  - Show this help menu");
    println!("  exit  - Exit the program");
}
