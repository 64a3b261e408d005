//! Demo that runs a few chairman verdicts through the full pipeline via
//! the mock council client and prints an ASCII spectrum bar per result.

use political_bias_analyzer::analyze::analyze_url;
use political_bias_analyzer::council::{
    AnalysisMetadata, AnalysisResponse, FinalVerdict, MockCouncilClient,
};
use political_bias_analyzer::position;
use political_bias_analyzer::session::{AuthResponse, Session};

fn bar(score: i32) -> String {
    // 51 cells: position 0..=100 in steps of 2.
    let idx = (position(score) / 2.0).round() as usize;
    let mut cells: Vec<char> = vec!['-'; 51];
    cells[25] = '|';
    cells[idx.min(50)] = 'o';
    cells.into_iter().collect()
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let session = Session::open(&AuthResponse {
        message: "Login successful".into(),
        user_id: "demo-user".into(),
        username: Some("demo".into()),
    });

    let verdicts = [
        (
            "# Classification: FAR LEFT\n\nCollectivist framing throughout.",
            Some(0.82),
        ),
        (
            "# Classification: LEAN RIGHT due to rhetoric on deregulation.",
            Some(0.74),
        ),
        (
            "# Classification: CENTER\n\nBalanced sourcing, neutral tone.",
            Some(0.55),
        ),
        ("no classification header at all", None),
    ];

    for (verdict, confidence) in verdicts {
        let client = MockCouncilClient {
            fixed: AnalysisResponse {
                stage3: FinalVerdict {
                    model: None,
                    response: verdict.to_string(),
                },
                metadata: AnalysisMetadata {
                    bias_embedding: Vec::new(),
                    confidence,
                },
                ..Default::default()
            },
        };

        match analyze_url(&client, &session, "https://example.com/post").await {
            Ok(r) => println!(
                "[{}] {} ({}%, {})",
                bar(r.score),
                r.label,
                r.confidence_percent(),
                r.tier.badge_label(),
            ),
            Err(e) => eprintln!("analysis failed: {e:#}"),
        }
    }

    session.close();
    println!("spectrum-demo done");
}
