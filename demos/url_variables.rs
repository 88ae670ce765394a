/// `QueryParams` and typed helpers usage example
use urlvars::{Object, QueryParams, Value, parse_typed, stringify};

fn main() -> urlvars::Result<()> {
    env_logger::init();

    // Build a structured object and stringify it
    let mut author = Object::new();
    author.insert("name".into(), "Samchon (Jeongho Nam)".into());
    author.insert("age".into(), 29.into());
    author.insert("homepage".into(), "http://samchon.org".into());
    author.insert("memo".into(), "Hello, I'm the best programmer in Korea.".into());
    author.insert("is_crazy".into(), true.into());

    let encoded = stringify(&author);
    println!("{encoded}");
    println!("----------------------------------");

    // Parse it back with type inference
    let object = parse_typed(&encoded, true)?;
    for (key, value) in &object {
        let kind = match value {
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
        };
        println!("  {key}: {value} ({kind})");
    }
    println!();

    // Work with the ordered map directly
    let mut params = QueryParams::parse(&format!("http://example.com/?{encoded}#top"))?;
    params.set("age", "30"); // overwritten in place
    params.set("nickname", "");
    println!("{params}");

    println!("Am I crazy?: {}", params.has("is_crazy"));
    println!("Has nickname?: {}", params.has("nickname"));
    match params.get("git") {
        Ok(git) => println!("git: {git}"),
        Err(err) => println!("{err}"),
    }

    Ok(())
}
