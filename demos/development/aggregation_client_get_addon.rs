use cursemeta::{AggregationClient, MetadataClient};

fn main() {
    env_logger::init();

    let client = AggregationClient::new().unwrap();
    let addon = client.fetch_addon(238222);
    dbg!(&addon);

    if let Some(addon) = addon {
        println!("Created: {:?}", addon.date_created());
        println!("{} files", client.fetch_all_addon_files(addon.id).len());
    }
}
