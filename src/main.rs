// votectl - drive a voting ledger from a line-oriented session on stdin

use clap::Parser;
use std::error::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;
use votechain::{
    ChannelSink, Clock, Identity, LedgerConfig, LedgerEvent, LogConfig, ManualClock,
    ProposalSnapshot, SharedLedger, SystemClock, VotingLedger,
};

#[derive(Parser, Debug)]
#[command(name = "votectl", version, about = "Run a voting ledger session from stdin")]
struct Cli {
    /// Admin identity (hex address). A random one is generated if omitted.
    #[arg(long)]
    admin: Option<String>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log: String,

    /// Start a manually driven clock at this Unix time, enabling `advance`
    #[arg(long)]
    start: Option<u64>,
}

struct Session {
    ledger: SharedLedger,
    manual_clock: Option<ManualClock>,
    events: UnboundedReceiver<LedgerEvent>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    LogConfig::new().with_filter(&cli.log).init();

    let admin = match cli.admin.as_deref() {
        Some(s) => Identity::parse(s)?,
        None => Identity::generate(),
    };

    let (sink, events) = ChannelSink::channel();
    let config = LedgerConfig::new(admin);
    let (ledger, manual_clock) = match cli.start {
        Some(start) => {
            let clock = ManualClock::new(start);
            (VotingLedger::new(config, clock.clone(), sink), Some(clock))
        }
        None => (VotingLedger::new(config, SystemClock, sink), None),
    };

    println!("admin: {}", admin);

    let mut session = Session {
        ledger: SharedLedger::new(ledger),
        manual_clock,
        events,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()?;
    runtime.block_on(session.run())
}

impl Session {
    async fn run(&mut self) -> Result<(), Box<dyn Error>> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Err(e) = self.execute(line) {
                println!("error: {}", e);
            }
            self.drain_events();
        }

        Ok(())
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            println!("event: {}", event);
        }
    }

    fn caller(&self, token: &str) -> Result<Identity, Box<dyn Error>> {
        if token == "admin" {
            return Ok(self.ledger.admin());
        }
        Ok(Identity::parse(token)?)
    }

    fn now(&self) -> u64 {
        match &self.manual_clock {
            Some(clock) => clock.now(),
            None => SystemClock.now(),
        }
    }

    fn execute(&mut self, line: &str) -> Result<(), Box<dyn Error>> {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match (command, args.as_slice()) {
            ("create", [caller, minutes, words @ ..]) => {
                let caller = self.caller(caller)?;
                let id = self
                    .ledger
                    .create_proposal(&caller, &words.join(" "), minutes.parse()?)?;
                println!("created proposal #{}", id);
            }
            ("vote", [caller, id]) => {
                let caller = self.caller(caller)?;
                self.ledger.vote(&caller, id.parse()?)?;
                println!("voted");
            }
            ("show", [id]) => {
                let proposal = self.ledger.get_proposal(id.parse()?)?;
                println!("{}", self.render(&proposal));
            }
            ("list", []) => {
                let proposals = self.ledger.get_all_proposals();
                if proposals.is_empty() {
                    println!("no proposals");
                }
                for proposal in &proposals {
                    println!("{}", self.render(proposal));
                }
            }
            ("voted", [id, identity]) => {
                let identity = self.caller(identity)?;
                println!("{}", self.ledger.has_voted(id.parse()?, &identity)?);
            }
            ("winner", []) => {
                let winner = self.ledger.get_winner()?;
                println!("winner: #{} with {} votes", winner.id, winner.vote_count);
            }
            ("advance", [secs]) => match &self.manual_clock {
                Some(clock) => {
                    clock.advance(secs.parse()?);
                    println!("now: {}", clock.now());
                }
                None => return Err("advance requires --start".into()),
            },
            ("admin", []) => println!("{}", self.ledger.admin()),
            _ => {
                warn!(command = line, "unrecognized command");
                return Err(format!("unrecognized command: {}", line).into());
            }
        }

        Ok(())
    }

    fn render(&self, proposal: &ProposalSnapshot) -> String {
        let status = if proposal.is_active() {
            format!("active, {}s left", proposal.remaining_secs(self.now()))
        } else {
            "ended".to_string()
        };
        let deadline = proposal
            .deadline_utc()
            .map(|d| d.to_rfc3339())
            .unwrap_or_else(|| proposal.deadline().to_string());

        format!(
            "#{} {:?} votes={} deadline={} ({})",
            proposal.id(),
            proposal.description(),
            proposal.vote_count(),
            deadline,
            status
        )
    }
}
