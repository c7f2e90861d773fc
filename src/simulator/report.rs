//! Simulation report generation.

/// Outcome of one simulated battle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BattleRun {
    pub won: bool,
    /// Died with no potions left
    pub died: bool,
    pub timed_out: bool,
    pub rounds: u32,
    pub revives: u32,
    pub gold_gained: u64,
    pub xp_gained: u64,
    pub drops: u32,
    pub final_hp: u32,
}

/// Aggregated results from multiple simulated battles.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub num_runs: u32,
    pub wins: u32,
    pub deaths: u32,
    pub timeouts: u32,
    pub total_revives: u32,

    pub win_rate: f64,
    pub avg_rounds: f64,
    pub avg_rounds_to_win: f64,
    pub avg_revives: f64,
    pub avg_gold: f64,
    pub avg_xp: f64,
    pub avg_drops: f64,

    // Individual runs for detailed analysis
    pub run_stats: Vec<BattleRun>,
}

impl SimReport {
    pub fn from_runs(runs: Vec<BattleRun>) -> Self {
        let num_runs = runs.len() as u32;
        let n = num_runs.max(1) as f64;
        let wins = runs.iter().filter(|r| r.won).count() as u32;
        let deaths = runs.iter().filter(|r| r.died).count() as u32;
        let timeouts = runs.iter().filter(|r| r.timed_out).count() as u32;
        let total_revives = runs.iter().map(|r| r.revives).sum::<u32>();

        let avg_rounds = runs.iter().map(|r| r.rounds as f64).sum::<f64>() / n;
        let avg_rounds_to_win = runs
            .iter()
            .filter(|r| r.won)
            .map(|r| r.rounds as f64)
            .sum::<f64>()
            / wins.max(1) as f64;
        let avg_gold = runs.iter().map(|r| r.gold_gained as f64).sum::<f64>() / n;
        let avg_xp = runs.iter().map(|r| r.xp_gained as f64).sum::<f64>() / n;
        let avg_drops = runs.iter().map(|r| r.drops as f64).sum::<f64>() / n;

        Self {
            num_runs,
            wins,
            deaths,
            timeouts,
            total_revives,
            win_rate: wins as f64 / n,
            avg_rounds,
            avg_rounds_to_win,
            avg_revives: total_revives as f64 / n,
            avg_gold,
            avg_xp,
            avg_drops,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 BATTLE SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} won, {} lost, {} timed out\n\n",
            self.num_runs, self.wins, self.deaths, self.timeouts
        ));

        report.push_str("── COMBAT ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Win Rate:          {:.1}%\n", self.win_rate * 100.0));
        report.push_str(&format!("  Avg Rounds:        {:.1}\n", self.avg_rounds));
        report.push_str(&format!("  Avg Rounds to Win: {:.1}\n", self.avg_rounds_to_win));
        report.push_str(&format!("  Avg Revives:       {:.2}\n\n", self.avg_revives));

        report.push_str("── REWARDS ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Gold:          {:.0}\n", self.avg_gold));
        report.push_str(&format!("  Avg XP:            {:.0}\n", self.avg_xp));
        report.push_str(&format!("  Avg Drops:         {:.2}\n\n", self.avg_drops));

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.win_rate > 0.95 && self.avg_revives < 0.1 {
            "TOO EASY - Players rarely take risk"
        } else if self.win_rate > 0.75 {
            "GOOD - Challenging but fair"
        } else if self.win_rate > 0.4 {
            "HARD - Potions decide the fight"
        } else {
            "TOO HARD - Most runs end here"
        };
        report.push_str(&format!("  Rating: {}\n", rating));
        report
    }
}
