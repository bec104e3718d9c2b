use crate::config::Config;
use crate::errors::AppResult;
use crate::store::directory::IdentityDirectory;
use crate::utils::colors::{GREY, RESET};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let directory = IdentityDirectory::load(cfg.users_file())?;

    if directory.is_empty() {
        println!("No cards registered yet.");
        return Ok(());
    }

    for identity in directory.identities() {
        if identity.has_default_name() {
            println!("{}  {}(no username){}", identity.identifier, GREY, RESET);
        } else {
            println!("{}  {}", identity.identifier, identity.display_name);
        }
    }
    println!("\n{} cards", directory.len());
    Ok(())
}
