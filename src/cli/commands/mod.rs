use anyhow::Result;

pub mod doctor;
pub mod instructions;
pub mod status;

pub async fn show_how_to_get_started() -> Result<()> {
    println!("📸 MyLifePictures.ai - Supabase setup diagnostics");
    println!();
    println!("Commands:");
    println!("  🩺 mylifepictures doctor         # Run the configuration checks");
    println!("  📊 mylifepictures status         # Show detected environment variables");
    println!("  📋 mylifepictures instructions   # Copy setup instructions");
    println!();
    println!("💡 Start with 'mylifepictures doctor' to verify your project.");
    Ok(())
}
