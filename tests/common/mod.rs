use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
    #[allow(dead_code)]
    data_dir: tempfile::TempDir,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Each test binary gets its own throwaway data file
        let data_dir = tempfile::tempdir().context("failed to create temp dir")?;
        let data_file = data_dir.path().join("data.json");

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/scribble-api");
        cmd.env("SCRIBBLE_PORT", port.to_string())
            .env("SCRIBBLE_DATA_FILE", &data_file)
            .env("SCRIBBLE_JWT_SECRET", "integration-test-secret")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
            data_dir,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            match client.get(&url).send().await {
                Ok(resp) => {
                    if resp.status() == StatusCode::OK
                        || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                    {
                        return Ok(());
                    }
                }
                Err(_) => {}
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Register a user and return (token, user id). Usernames must be unique
/// per test since the server's data file is shared within a test binary.
#[allow(dead_code)]
pub async fn register(
    server: &TestServer,
    client: &reqwest::Client,
    username: &str,
) -> Result<(String, i64)> {
    let res = client
        .post(format!("{}/api/auth/register", server.base_url))
        .json(&serde_json::json!({ "username": username, "password": "hunter22" }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "register failed with status {}",
        res.status()
    );

    let body: serde_json::Value = res.json().await?;
    let token = body["data"]["token"]
        .as_str()
        .context("missing token in register response")?
        .to_string();
    let id = body["data"]["user"]["id"]
        .as_i64()
        .context("missing user id in register response")?;
    Ok((token, id))
}
