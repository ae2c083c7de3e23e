use rand::{rngs::StdRng, Rng, SeedableRng};
use taxi_sarsa::{
    env::Environment,
    monitor::{interact, MonitorConfig},
    ExpectedSarsaAgent, ExpectedSarsaAgentConfig,
};

/// A 2x2 grid with a passenger to pick up and drop off, encoded as
/// `(row, col, carrying)`. Actions: 0 down, 1 up, 2 right, 3 left, 4 pickup, 5 dropoff.
struct TinyTaxi {
    state: (u8, u8, bool),
}

const PASSENGER: (u8, u8) = (0, 1);
const DESTINATION: (u8, u8) = (1, 0);

impl Environment for TinyTaxi {
    type State = (u8, u8, bool);

    fn reset(&mut self) -> Self::State {
        self.state = (0, 0, false);
        self.state
    }

    fn step(&mut self, action: usize) -> (Self::State, f32, bool) {
        let (row, col, carrying) = self.state;
        let (next, reward, done) = match action {
            0 => (((row + 1).min(1), col, carrying), -1.0, false),
            1 => ((row.saturating_sub(1), col, carrying), -1.0, false),
            2 => ((row, (col + 1).min(1), carrying), -1.0, false),
            3 => ((row, col.saturating_sub(1), carrying), -1.0, false),
            4 if !carrying && (row, col) == PASSENGER => ((row, col, true), -1.0, false),
            5 if carrying && (row, col) == DESTINATION => ((row, col, false), 20.0, true),
            _ => (self.state, -10.0, false),
        };
        self.state = next;
        (next, reward, done)
    }
}

#[test]
fn epsilon_decays_over_ten_thousand_steps() {
    let mut agent = ExpectedSarsaAgent::<u32>::new(ExpectedSarsaAgentConfig {
        eps_start: 1.0,
        eps_min: 1e-8,
        eps_decay: 0.9995,
        alpha: 0.6,
        gamma: 1.0,
        n_actions: 6,
        ..Default::default()
    })
    .unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    let mut previous = agent.epsilon();
    for _ in 0..10_000 {
        let state = rng.gen_range(0..500);
        let action = agent.select_action(state, &mut rng);
        assert!(action < 6);
        agent.step(
            state,
            action,
            rng.gen_range(-10.0..20.0),
            rng.gen_range(0..500),
            rng.gen_bool(0.05),
        );
        assert!(agent.epsilon() <= previous);
        previous = agent.epsilon();
    }

    assert!(agent.epsilon() < 1.0);
    assert!(agent.epsilon() >= 1e-8);
    assert!(agent.q_table().len() <= 500);
}

#[test]
fn learns_tiny_taxi() {
    let mut env = TinyTaxi {
        state: (0, 0, false),
    };
    let mut agent = ExpectedSarsaAgent::new(ExpectedSarsaAgentConfig {
        eps_decay: 0.999,
        eps_min: 0.001,
        mask_terminal: true,
        ..Default::default()
    })
    .unwrap();
    let config = MonitorConfig {
        num_episodes: 1_000,
        window: 50,
        max_steps: Some(100),
    };
    let mut rng = StdRng::seed_from_u64(7);

    let summary = interact(&mut env, &mut agent, &config, &mut rng).unwrap();

    // right, pickup, down, left, dropoff
    let best = summary.best_avg_reward.unwrap();
    assert!(best > 10.0, "best average reward {best}");

    let mut state = env.reset();
    let mut reward = 0.0;
    for _ in 0..5 {
        let (next, r, done) = env.step(agent.greedy_action(&state));
        reward += r;
        state = next;
        if done {
            break;
        }
    }
    assert_eq!(reward, 16.0, "greedy policy solves the task in five moves");
}
