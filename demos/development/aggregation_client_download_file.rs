use cursemeta::{AggregationClient, MetadataClient};
use std::path::Path;

fn main() {
    env_logger::init();

    let client = AggregationClient::new().unwrap();
    let file = client.fetch_addon_file(32274, 2709306).unwrap();
    client
        .download_file(&file, Path::new(&file.file_name))
        .unwrap();
    println!("Downloaded {} successfully", file.file_name);
}
