use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use configs::{AppConfig, StorageBackend};
use server::startup::{build_app, build_state};

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.auth.token_secret = "test-secret".into();
    cfg.storage.backend = StorageBackend::Memory;

    let state = build_state(&cfg).await?;
    let app = build_app(&cfg, state)?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("reqwest client")
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn seed(&self, c: &reqwest::Client, owner: &str, name: &str) -> anyhow::Result<()> {
        let res = c
            .post(self.url("/api/v1/services/create-service"))
            .json(&json!({"serviceName": name, "ownerEmail": owner, "price": 30}))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
        Ok(())
    }

    async fn login(&self, c: &reqwest::Client, email: &str) -> anyhow::Result<reqwest::Response> {
        let res = c
            .post(self.url("/api/v1/auth/access-token"))
            .json(&json!({"email": email}))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
        Ok(res)
    }
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn e2e_owner_sees_only_own_listings() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    app.seed(&c, "a@x.com", "Resume").await?;
    app.seed(&c, "b@x.com", "Interview").await?;
    app.login(&c, "a@x.com").await?;

    let res = c.get(app.url("/api/v1/owner/services?email=a@x.com")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let rows: Vec<Value> = res.json().await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["ownerEmail"], "a@x.com");
    Ok(())
}

#[tokio::test]
async fn e2e_foreign_scope_is_forbidden() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    app.login(&c, "a@x.com").await?;
    let res = c.get(app.url("/api/v1/owner/services?email=b@x.com")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);
    assert_eq!(res.json::<Value>().await?["message"], "forbidden access");
    Ok(())
}

#[tokio::test]
async fn e2e_without_credential_is_unauthorized() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/api/v1/owner/services?email=a@x.com")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>().await?["message"], "You are not authorized");
    Ok(())
}

#[tokio::test]
async fn e2e_logout_clears_cookie_but_does_not_revoke() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let res = app.login(&c, "a@x.com").await?;
    let token = res
        .cookies()
        .find(|ck| ck.name() == "token")
        .map(|ck| ck.value().to_string())
        .ok_or_else(|| anyhow::anyhow!("token cookie missing"))?;

    let res = c.post(app.url("/api/v1/auth/logOut")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    // the cookie store honored the removal
    let res = c.get(app.url("/api/v1/user/bookings?email=a@x.com")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);

    // a copy captured before logout keeps working until it expires
    let replay = reqwest::Client::new()
        .get(app.url("/api/v1/user/bookings?email=a@x.com"))
        .header(reqwest::header::COOKIE, format!("token={token}"))
        .send()
        .await?;
    assert_eq!(replay.status(), HttpStatusCode::OK);
    Ok(())
}
