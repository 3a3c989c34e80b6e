mod link;

/// Assemble the Rocket that serves the linking flow. Everything the routes
/// need is managed state built from the supplied configuration.
pub fn launch(config: crate::config::Config) -> rocket::Rocket<rocket::Build> {
    let discord = crate::discord::Discord::new(&config);
    let steam = crate::steam::Steam::new(&config);
    rocket::build()
        .mount("/", rocket::routes![
            link::oauth_err,
            link::oauth_code,
            link::oauth_start,
        ])
        .manage(discord)
        .manage(steam)
        .manage(config)
}
