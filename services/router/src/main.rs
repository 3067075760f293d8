use anyhow::{bail, Context, Result};
use clap::Parser;
use eddy_amm::slippage_bps_from_percent;
use eddy_config::RouterConfig;
use eddy_router::{
    plan_position, snapshot_loader, CallBackend, ChainReader, PositionRequest, QuoteRequest,
    RouteAggregator, Web3CallBackend,
};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use types::{format_units, parse_address};

/// Quote the best swap route over a pool snapshot
#[derive(Parser, Debug)]
#[command(name = "eddy_quote", version)]
struct Args {
    /// Router configuration (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Market snapshot (JSON)
    #[arg(long)]
    snapshot: PathBuf,

    /// Input token symbol or address
    #[arg(long)]
    token_in: String,

    /// Output token symbol or address
    #[arg(long)]
    token_out: String,

    /// Human amount of the input token, e.g. 1.5
    #[arg(long)]
    amount: String,

    /// Slippage tolerance in basis points
    #[arg(long, conflicts_with = "slippage")]
    slippage_bps: Option<u16>,

    /// Slippage tolerance in percent, e.g. 0.5
    #[arg(long)]
    slippage: Option<Decimal>,

    /// JSON-RPC endpoint for quoter simulation and chain refresh
    #[arg(long)]
    rpc_url: Option<String>,

    /// Re-read V3 slot state and V2 reserves before quoting (needs --rpc-url)
    #[arg(long, requires = "rpc_url")]
    refresh: bool,

    /// Multi-hop intermediate token; repeatable, overrides the configured set
    #[arg(long = "intermediate")]
    intermediates: Vec<String>,

    /// Lower range price (token-out per token-in) for a liquidity position
    #[arg(long)]
    range_lower: Option<f64>,

    /// Upper range price (token-out per token-in) for a liquidity position
    #[arg(long)]
    range_upper: Option<f64>,

    /// Tick spacing of the position's pool; defaults to the first configured spacing
    #[arg(long)]
    tick_spacing: Option<i32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config =
        RouterConfig::load(args.config.as_deref()).context("Failed to load router config")?;
    if let Some(rpc_url) = &args.rpc_url {
        config.rpc_url = Some(rpc_url.clone());
        config.validate()?;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🚀 Starting eddy_quote");

    let mut market = snapshot_loader::load_market_snapshot(&args.snapshot)?;
    let token_in = snapshot_loader::find_token(&market, &args.token_in)?;
    let token_out = snapshot_loader::find_token(&market, &args.token_out)?;
    let wrapped_native = config.wrapped_native_address()?;

    let backend: Option<Arc<dyn CallBackend>> = match &config.rpc_url {
        Some(url) => {
            let backend: Arc<dyn CallBackend> = Arc::new(Web3CallBackend::new(url, config.call_timeout())?);
            Some(backend)
        }
        None => None,
    };

    if let (true, Some(backend)) = (args.refresh, &backend) {
        let reader = ChainReader::new(backend.clone(), config.factory()?, config.tick_spacings.clone());
        let (a, b) = (
            token_in.routing_address(wrapped_native),
            token_out.routing_address(wrapped_native),
        );
        reader.refresh_v3_pair(&mut market, a, b).await;
        reader.refresh_v2_reserves(&mut market).await;
    }

    let mut request = QuoteRequest::from_human(token_in.clone(), token_out.clone(), &args.amount)?;
    match (args.slippage_bps, args.slippage) {
        (Some(bps), _) => request = request.with_slippage_bps(bps),
        (None, Some(percent)) => request = request.with_slippage_bps(slippage_bps_from_percent(percent)?),
        (None, None) => {}
    }
    if !args.intermediates.is_empty() {
        let intermediates = args
            .intermediates
            .iter()
            .map(|raw| match parse_address(raw) {
                Ok(address) => Ok(address),
                Err(_) => snapshot_loader::find_token(&market, raw).map(|t| t.address),
            })
            .collect::<Result<Vec<_>>>()?;
        request = request.with_intermediates(intermediates);
    }

    let aggregator = RouteAggregator::from_config(&config, backend)?;
    let plan = aggregator.quote_with_slippage(&request, &market).await?;

    println!("Route:       {}", plan.route);
    for hop in plan.route.hops() {
        println!("  hop        {:?} -> {:?} via {:?}", hop.token_in, hop.token_out, hop.pool);
    }
    println!(
        "Amount out:  {} {}",
        format_units(plan.route.amount_out(), token_out.decimals),
        token_out
    );
    println!(
        "Minimum out: {} {} ({} bps)",
        format_units(plan.min_output.amount_out_min, token_out.decimals),
        token_out,
        plan.min_output.slippage_bps
    );

    if args.range_lower.is_some() || args.range_upper.is_some() {
        let tick_spacing = match args.tick_spacing {
            Some(spacing) => spacing,
            None => match config.tick_spacings.first() {
                Some(spacing) => *spacing,
                None => bail!("No tick spacing configured for the position"),
            },
        };
        let input_amount: f64 = args
            .amount
            .parse()
            .with_context(|| format!("Invalid position amount {:?}", args.amount))?;

        let position = plan_position(
            &PositionRequest {
                base: token_in.clone(),
                quote: token_out.clone(),
                tick_spacing,
                lower_price: args.range_lower,
                upper_price: args.range_upper,
                input_token: token_in.address,
                input_amount,
            },
            &market,
            wrapped_native,
        )?;

        println!(
            "Position:    ticks [{}, {}] at spacing {}",
            position.lower_tick, position.upper_tick, position.tick_spacing
        );
        for token in [&token_in, &token_out] {
            let address = token.routing_address(wrapped_native);
            if let Some(amount) = position.amount_of(address) {
                println!("  deposit    {} {}", amount, token);
            }
        }
    }

    Ok(())
}
