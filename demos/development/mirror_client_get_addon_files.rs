use cursemeta::{MetadataClient, MirrorClient};

fn main() {
    env_logger::init();

    let client = MirrorClient::new().unwrap();
    for addon in client.fetch_addons(&[310111, 32274, 311812]).unwrap() {
        println!("Found addon: {}", addon.name);
    }

    let files = client
        .fetch_addon_files_map(&[32274], &[2709306])
        .unwrap();
    for (key, file) in files {
        println!("{}: {}", key, file.file_name_on_disk);
    }
}
