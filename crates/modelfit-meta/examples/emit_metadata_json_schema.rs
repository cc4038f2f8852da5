use modelfit_meta::metadata_json_schema;

fn main() {
    let schema = metadata_json_schema();
    let json = serde_json::to_string_pretty(&schema).expect("serialize metadata json schema");
    println!("{json}");
}
