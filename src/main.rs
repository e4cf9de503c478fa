use axum::ServiceExt;
use axum::extract::Request;
use dotenvy::dotenv;
use prepdesk::cli;
use prepdesk::logging::init_tracing;
use prepdesk::router::init_router;
use prepdesk::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "create-admin" {
        handle_create_admin(args).await;
        return;
    }

    if args.len() > 1 && args[1] == "seed" {
        handle_seed().await;
        return;
    }

    init_tracing();

    let state = init_app_state().await;
    let app = init_router(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {}: {}", addr, e));
    println!("Server running on http://localhost:{}", port);
    println!("Swagger UI available at http://localhost:{}/swagger-ui", port);
    println!("Scalar UI available at http://localhost:{}/scalar", port);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .await
        .unwrap();
}

async fn connect_pool() -> sqlx::PgPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

async fn handle_create_admin(args: Vec<String>) {
    if args.len() != 4 {
        eprintln!("Usage: {} create-admin <email> <password>", args[0]);
        std::process::exit(1);
    }

    let email = &args[2];
    let password = &args[3];

    let pool = connect_pool().await;

    match cli::create_admin(&pool, email, password).await {
        Ok(_) => {
            println!("Admin created successfully!");
            println!("   Email: {}", email);
        }
        Err(e) => {
            eprintln!("Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed() {
    let pool = connect_pool().await;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    if let Err(e) = cli::seeder::seed_database(&pool, 5, 40, 6, 8).await {
        eprintln!("Error seeding database: {}", e);
        std::process::exit(1);
    }
}
