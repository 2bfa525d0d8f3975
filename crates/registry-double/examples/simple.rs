use registry_double::{AddRegistrationRequest, Registration, RegistryDouble};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Start a double on an ephemeral port
    let running = RegistryDouble::new().start().await?;
    let base = running.url().clone();
    println!("Registry double listening on {}", base);

    // Register a service; nothing listens on its health port, so it is DOWN
    let registration = Registration::new("example-service", "127.0.0.1", 9999)
        .with_health_check("http", "/health")
        .with_metadata("labels", vec!["example"]);

    let client = reqwest::Client::new();
    let response = client
        .post(base.join("api/v3/registry")?)
        .json(&AddRegistrationRequest { registration })
        .send()
        .await?;
    println!("Register returned {}", response.status());

    // Look it up again
    let body: serde_json::Value = client
        .get(base.join("api/v3/registry/serviceId/example-service")?)
        .send()
        .await?
        .json()
        .await?;
    println!("Lookup returned:\n{}", serde_json::to_string_pretty(&body)?);

    running.stop().await?;
    println!("Registry double stopped");

    Ok(())
}
