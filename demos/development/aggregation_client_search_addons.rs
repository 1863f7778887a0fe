use cursemeta::{AggregationClient, MetaSearch, SortMethod};

fn main() {
    env_logger::init();

    let client = AggregationClient::new().unwrap();
    let addons = MetaSearch::new(432)
        .sort(SortMethod::Popularity)
        .search_filter("roughly enough")
        .page_size(10)
        .search(&client);

    for addon in addons {
        println!("Found addon: {} (ID: {})", addon.name, addon.id);
    }
}
