fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Client stubs are only used by the integration tests
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile(&["../proto/user.proto"], &["../proto"])?;

    Ok(())
}
