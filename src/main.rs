use crate::domain::extract::FieldExtractor;
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;

mod domain;
mod errors;
mod geos;
mod responses;
mod router;
mod spreadsheets;
mod templates;
mod wizard;

#[cfg(test)]
mod tests;

fn main() {
    // 1️⃣ Compile the assessment-text patterns once, shared across workers
    let extractor = match FieldExtractor::new() {
        Ok(extractor) => extractor,
        Err(e) => {
            eprintln!("❌ Field extractor initialization failed: {e}");
            std::process::exit(1);
        }
    };

    // 2️⃣ Start the server
    let addr: SocketAddr = std::env::var("ESTIMATE_BIND")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .unwrap_or_else(|e| {
            eprintln!("❌ Invalid ESTIMATE_BIND address: {e}");
            std::process::exit(1);
        });
    println!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    // 3️⃣ Serve requests, passing the extractor into the closure
    let result = server.serve(move |req, _info| match handle(req, &extractor) {
        Ok(resp) => resp,
        Err(err) => responses::error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
