//! Randomised checks of the elimination engine against brute force and the certificate bound.

use division_elimination::{
    build_network, evaluate_team, trivial_eliminator, Division, LoadOptions, Standings, TeamRow,
    Verdict,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random division of `n` teams. With `outside` set, some remaining games are against
/// teams outside the table.
fn random_standings(rng: &mut StdRng, n: usize, max_games: i64, outside: bool) -> Standings {
    let mut against = vec![vec![0i64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let g = rng.gen_range(0..=max_games);
            against[i][j] = g;
            against[j][i] = g;
        }
    }
    let rows = (0..n)
        .map(|i| {
            let extra = if outside { rng.gen_range(0..=3) } else { 0 };
            let remaining: i64 = against[i].iter().sum::<i64>() + extra;
            TeamRow::new(
                format!("T{i}"),
                rng.gen_range(0..=20),
                rng.gen_range(0..=20),
                remaining,
                against[i].clone(),
            )
        })
        .collect();
    Standings::from_rows(
        rows,
        LoadOptions {
            allow_outside_games: outside,
        },
    )
    .unwrap()
}

/// Can every game among the teams other than `team` be decided so nobody passes `cap`?
fn feasible(standings: &Standings, team: usize, cap: u64) -> bool {
    let others: Vec<usize> = (0..standings.len()).filter(|&i| i != team).collect();
    let pairs: Vec<(usize, usize)> = others
        .iter()
        .enumerate()
        .flat_map(|(k, &a)| others[k + 1..].iter().map(move |&b| (a, b)))
        .collect();
    let mut wins: Vec<u64> = standings.teams().iter().map(|t| u64::from(t.wins)).collect();
    if others.iter().any(|&i| wins[i] > cap) {
        return false;
    }
    assign(standings, &pairs, 0, &mut wins, cap)
}

fn assign(standings: &Standings, pairs: &[(usize, usize)], at: usize, wins: &mut [u64], cap: u64) -> bool {
    let Some(&(a, b)) = pairs.get(at) else {
        return true;
    };
    let games = u64::from(standings.against(a, b));
    for to_a in 0..=games {
        let to_b = games - to_a;
        if wins[a] + to_a > cap || wins[b] + to_b > cap {
            continue;
        }
        wins[a] += to_a;
        wins[b] += to_b;
        let ok = assign(standings, pairs, at + 1, wins, cap);
        wins[a] -= to_a;
        wins[b] -= to_b;
        if ok {
            return true;
        }
    }
    false
}

#[test]
fn verdicts_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let n = rng.gen_range(1..=5);
        let outside = rng.gen_bool(0.3);
        let s = random_standings(&mut rng, n, 3, outside);
        for t in 0..n {
            let cap = s.record(t).max_wins();
            let verdict = evaluate_team(&s, t).unwrap();
            assert_eq!(
                verdict.is_eliminated(),
                !feasible(&s, t, cap),
                "team {t} of {:?}",
                s.teams()
            );
        }
    }
}

#[test]
fn certificates_prove_elimination() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..150 {
        let n = rng.gen_range(2..=8);
        let s = random_standings(&mut rng, n, 6, false);
        let d = Division::new(s).unwrap();
        let s = d.standings();
        for t in 0..n {
            let name = &s.record(t).name;
            let Verdict::Eliminated(cert) = d.verdict(name).unwrap() else {
                continue;
            };
            let r = &cert.teams;
            assert!(!r.is_empty());
            assert!(!r.contains(&t));
            let won: u64 = r.iter().map(|&i| u64::from(s.record(i).wins)).sum();
            let among: u64 = r
                .iter()
                .enumerate()
                .flat_map(|(k, &a)| r[k + 1..].iter().map(move |&b| (a, b)))
                .map(|(a, b)| u64::from(s.against(a, b)))
                .sum();
            // (won + among) / |R| > max wins of t
            assert!(
                won + among > s.record(t).max_wins() * r.len() as u64,
                "{name} with certificate {r:?}"
            );
        }
    }
}

#[test]
fn alive_iff_network_saturates() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..150 {
        let n = rng.gen_range(1..=7);
        let s = random_standings(&mut rng, n, 5, false);
        for t in 0..n {
            let verdict = evaluate_team(&s, t).unwrap();
            if trivial_eliminator(&s, t).is_some() {
                assert!(verdict.is_eliminated());
                continue;
            }
            let outcome = build_network(&s, t).unwrap().solve().unwrap();
            assert_eq!(!verdict.is_eliminated(), outcome.is_saturated());
            assert!(outcome.flow <= outcome.scheduled);
        }
    }
}

#[test]
fn zero_remaining_below_leader_is_eliminated_by_one_team() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let n = rng.gen_range(2..=6);
        let s = random_standings(&mut rng, n, 2, false);
        let d = Division::new(s.clone()).unwrap();
        let best = s.teams().iter().map(|t| t.wins).max().unwrap();
        for t in s.teams() {
            if t.remaining == 0 && t.wins < best {
                let cert = d.certificate_of_elimination(&t.name).unwrap().unwrap();
                assert_eq!(cert.len(), 1);
            }
        }
    }
}
