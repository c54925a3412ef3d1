use modfeed::core::ModfeedResult;
use modfeed::release::version_code;

pub fn run(tag: &str) -> ModfeedResult<()> {
    println!("{}", version_code(tag));
    Ok(())
}
