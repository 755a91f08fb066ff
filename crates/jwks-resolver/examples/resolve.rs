//! Resolve signing keys and print them as PEM
//!
//! ```not_rust
//! JWKS_URI=https://www.googleapis.com/oauth2/v3/certs cargo run --example resolve -- <kid> [<kid>...]
//! ```

use jwks_resolver::{KeyResolver, ResolverConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jwks_resolver=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let resolver = match ResolverConfig::from_env().and_then(KeyResolver::new) {
        Ok(resolver) => resolver,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let kids: Vec<String> = std::env::args().skip(1).collect();
    if kids.is_empty() {
        // Without arguments, list what the endpoint currently publishes
        match resolver.signing_keys().await {
            Ok(keys) => {
                for key in keys {
                    println!("{} ({})", key.kid(), key.material().kind());
                }
            }
            Err(e) => eprintln!("{e}"),
        }
        return;
    }

    // Every kid twice: the second lookup is served from the cache
    for kid in kids.iter().chain(kids.iter()) {
        match resolver.resolve(kid).await {
            Ok(key) => println!("{}:\n{}", key.kid(), key.public_key_pem()),
            Err(e) => eprintln!("{kid}: {e}"),
        }
    }

    println!("cached: {:?}", resolver.cached_kids());
}
