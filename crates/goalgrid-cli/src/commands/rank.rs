use goalgrid_core::rank_name;

pub fn run(level: u32) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", rank_name(level));
    Ok(())
}
