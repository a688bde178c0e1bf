/// Entry point of the LXD container metrics collector.
///
/// Performs a single collection and prints the line protocol output to stdout. Logs go to
/// stderr and are controlled through `RUST_LOG`.
///
/// # Errors
///
/// Exits with a non-zero status and prints nothing to stdout if the collection fails.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug LXD_SOCKET_PATH=/var/snap/lxd/common/lxd/unix.socket lxd-stats
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let config = lxd_stats::config::Config::from_env();
    let output = lxd_stats::run(&config)
        .await
        .inspect_err(|err| log::error!("{err}"))?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
