use tributary::{Registry, Tributary};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Registering providers does not touch the network.
    let registry = Registry::init([tributary_fred::provider()?, tributary_mock::provider()?])?;

    // Which providers serve which category.
    for (category, providers) in registry.coverage() {
        println!("{category:<20} {}", providers.join(", "));
    }

    // The full map, with every query and data schema, as JSON.
    let map = registry.describe();
    println!("{}", serde_json::to_string_pretty(&map)?);

    let tributary = Tributary::builder()
        .with_registry(std::sync::Arc::new(registry))
        .build()?;
    println!("{} providers registered", tributary.registry().len());

    Ok(())
}
