//! Combat resolution
//!
//! Hits, eliminations, respawns, departures and the activity counters that
//! feed the final report. All of it runs inside [`MatchSession`] so every
//! change to lives, stats and the roster happens under one `&mut`.

use tracing::{debug, info};

use super::events::{Effect, FeedLine, MatchEvent, Notice};
use super::session::MatchSession;
use super::stats::StatKind;
use super::types::{HitCause, PlayerId};

/// What a hit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Match over, stale target, unrelated players or a self-hit
    Ignored,
    /// Target was spawn protected
    Blocked,
    /// Enemy hit, target still alive
    Hit { lives_left: i32 },
    /// Enemy hit took the last life
    Eliminated,
    /// Friendly fire, penalised but harmless
    TeamHit,
}

impl MatchSession {
    /// A ball (or any other weapon) from `shooter` struck `target`
    pub fn on_hit(&mut self, target: PlayerId, shooter: PlayerId, cause: HitCause) -> HitOutcome {
        if self.match_over || target == shooter || self.out.contains(&shooter) {
            return HitOutcome::Ignored;
        }
        if self.survival.lives(target).unwrap_or(0) <= 0 {
            return HitOutcome::Ignored;
        }

        if self.roster.are_enemies(target, shooter) {
            self.enemy_hit(target, shooter, cause)
        } else if self.roster.are_teammates(target, shooter) {
            self.team_hit(target, shooter)
        } else {
            HitOutcome::Ignored
        }
    }

    fn enemy_hit(&mut self, target: PlayerId, shooter: PlayerId, cause: HitCause) -> HitOutcome {
        if self.survival.is_protected(target) {
            self.emit(MatchEvent::Effect {
                effect: Effect::Protected,
                players: vec![shooter, target],
            });
            self.emit(MatchEvent::Notice {
                to: shooter,
                notice: Notice::YouHitProtected { target },
            });
            self.emit(MatchEvent::Notice {
                to: target,
                notice: Notice::YouWereHitProtected { shooter },
            });
            return HitOutcome::Blocked;
        }

        let Some(lives_left) = self.survival.lose_life(target) else {
            return HitOutcome::Ignored;
        };

        let rewards = self.ctx.config.rewards;
        self.credit(
            shooter,
            &[
                (StatKind::Hits, 1),
                (StatKind::Points, rewards.points_per_hit),
                (StatKind::Money, rewards.cash_per_hit),
            ],
        );

        if lives_left <= 0 {
            self.eliminate(target, Some((shooter, cause)));
            return HitOutcome::Eliminated;
        }

        let max_lives = self.settings.lives;
        let hits_taken = max_lives - lives_left;
        self.emit(MatchEvent::Effect {
            effect: Effect::Hit,
            players: vec![shooter, target],
        });
        self.emit(MatchEvent::Notice {
            to: shooter,
            notice: Notice::YouHit {
                target,
                hits_taken,
                lives_left,
                max_lives,
            },
        });
        self.emit(MatchEvent::Notice {
            to: target,
            notice: Notice::YouWereHit {
                shooter,
                hits_taken,
                lives_left,
                max_lives,
            },
        });

        debug!(match_id = %self.id, %target, %shooter, lives_left, "Hit");
        HitOutcome::Hit { lives_left }
    }

    fn team_hit(&mut self, target: PlayerId, shooter: PlayerId) -> HitOutcome {
        let penalty = self.ctx.config.rewards.points_per_team_attack;
        self.credit(
            shooter,
            &[(StatKind::TeamAttacks, 1), (StatKind::Points, penalty)],
        );

        self.emit(MatchEvent::Effect {
            effect: Effect::TeamAttack,
            players: vec![shooter],
        });
        self.emit(MatchEvent::Notice {
            to: shooter,
            notice: Notice::YouHitMate {
                target,
                points: (penalty != 0).then_some(penalty),
            },
        });
        self.emit(MatchEvent::Notice {
            to: target,
            notice: Notice::HitByMate { shooter },
        });

        debug!(match_id = %self.id, %target, %shooter, "Team hit");
        HitOutcome::TeamHit
    }

    /// Non-combat death (fall, lava, void). Returns false when ignored.
    pub fn on_death(&mut self, target: PlayerId) -> bool {
        if self.match_over || self.out.contains(&target) {
            return false;
        }
        if self.roster.side_of(target).is_none() || self.survival.lives(target).unwrap_or(0) <= 0 {
            return false;
        }
        self.eliminate(target, None);
        true
    }

    /// End `target`'s current life, then respawn, bench or kick them and
    /// check whether their team is wiped out.
    pub(super) fn eliminate(&mut self, target: PlayerId, killer: Option<(PlayerId, HitCause)>) {
        if self.match_over {
            return;
        }
        let Some(side) = self.roster.side_of(target) else {
            return;
        };

        let rewards = self.ctx.config.rewards;
        if let Some((killer, cause)) = killer {
            self.emit(MatchEvent::Effect {
                effect: Effect::Frag,
                players: vec![killer, target],
            });
            self.credit(
                killer,
                &[
                    (StatKind::Kills, 1),
                    (StatKind::Points, rewards.points_per_kill),
                    (StatKind::Money, rewards.cash_per_kill),
                ],
            );
            self.emit(MatchEvent::Notice {
                to: killer,
                notice: Notice::YouKilled {
                    target,
                    points: rewards.points_per_kill,
                    money: rewards.cash_per_kill,
                },
            });
            self.emit(MatchEvent::Notice {
                to: target,
                notice: Notice::YouWereKilled { killer },
            });
            self.emit(MatchEvent::Feed {
                line: FeedLine::Kill {
                    killer,
                    target,
                    cause,
                },
            });
        } else {
            self.emit(MatchEvent::Notice {
                to: target,
                notice: Notice::YouDied,
            });
            self.emit(MatchEvent::Feed {
                line: FeedLine::Death { target },
            });
        }
        self.credit(target, &[(StatKind::Deaths, 1)]);

        self.survival.eliminate(target);
        self.emit(MatchEvent::PlayerEliminated {
            player: target,
            killer: killer.map(|(k, _)| k),
            cause: killer.map(|(_, c)| c),
        });

        info!(
            match_id = %self.id,
            %target,
            killer = ?killer.map(|(k, _)| k),
            side = %side,
            "Player eliminated"
        );

        let strikes = self.judge_idle(target);
        if self.survival.is_survivor(&self.roster, target) {
            let policy = self.ctx.config.idle;
            if policy.enabled && strikes >= policy.required_lives {
                self.kick_idle(target);
            } else {
                self.respawn(target);
            }
        } else {
            self.bench(target);
        }

        if self.survival.survivors(&self.roster, side) == 0 {
            self.game_end(Some(side.opponent()));
        }
    }

    /// Record an idle life as a strike; any activity clears the streak.
    ///
    /// A life counts as idle when it ended within the idle radius of its
    /// spawn point with no shots fired and no kills made.
    fn judge_idle(&mut self, target: PlayerId) -> u32 {
        let policy = self.ctx.config.idle;
        if !policy.enabled {
            return 0;
        }

        let stayed = match (
            self.ctx.positions.position(target),
            self.spawn_points.get(&target),
        ) {
            (Some(current), Some(spawn)) => current
                .distance(spawn)
                .map_or(false, |d| d <= policy.radius),
            _ => false,
        };
        let offense = self
            .stats
            .get(&target)
            .map(|s| s.offense())
            .unwrap_or_default();
        let at_spawn = self.life_offense.get(&target).copied().unwrap_or_default();

        if stayed && offense == at_spawn {
            let strikes = self.ctx.idle.add_strike(target);
            debug!(match_id = %self.id, %target, strikes, "Idle life");
            strikes
        } else {
            self.ctx.idle.clear(target);
            0
        }
    }

    fn kick_idle(&mut self, target: PlayerId) {
        self.ctx.idle.clear(target);
        self.survival.clear_respawns(target);
        self.roster.remove_from_team(target);
        self.out.insert(target);
        self.just_respawned.remove(&target);

        self.emit(MatchEvent::PlayerRemoved { player: target });
        self.emit(MatchEvent::IdleKicked { player: target });
        self.emit(MatchEvent::Feed {
            line: FeedLine::IdleLeave { player: target },
        });
        self.emit(MatchEvent::Notice {
            to: target,
            notice: Notice::YouLeftTeam,
        });

        info!(match_id = %self.id, %target, "Idle player removed from match");
    }

    fn respawn(&mut self, target: PlayerId) {
        let lives = self.settings.lives;
        self.survival.restore(target, lives);
        let respawns_left = self.survival.respawns(target).unwrap_or(0);
        let respawns = (!self.settings.unlimited_respawns()).then_some(respawns_left);

        self.emit(MatchEvent::Notice {
            to: target,
            notice: Notice::Respawn { lives, respawns },
        });
        self.emit(MatchEvent::PlayerRespawned {
            player: target,
            respawns_left,
        });
        self.spawn_player(target);

        debug!(match_id = %self.id, %target, respawns_left, "Player respawned");
    }

    fn bench(&mut self, target: PlayerId) {
        self.out.insert(target);
        self.just_respawned.remove(&target);
        self.emit(MatchEvent::PlayerRemoved { player: target });
        self.emit(MatchEvent::PlayerOut { player: target });
        info!(match_id = %self.id, %target, "Player out of the match");
    }

    /// A participant left. Team members forfeit their lives, spectators are
    /// dropped. Returns false when there was nothing to do.
    pub fn left(&mut self, player: PlayerId) -> bool {
        if self.match_over {
            return false;
        }

        if let Some(side) = self.roster.side_of(player) {
            self.ctx.idle.clear(player);
            if self.out.contains(&player) {
                return false;
            }
            self.survival.forfeit(player);
            self.out.insert(player);
            self.just_respawned.remove(&player);
            self.emit(MatchEvent::PlayerRemoved { player });

            info!(match_id = %self.id, %player, side = %side, "Player left the match");

            if self.survival.survivors(&self.roster, side) == 0 {
                self.game_end(Some(side.opponent()));
            }
            true
        } else if self.roster.remove_spectator(player) {
            debug!(match_id = %self.id, %player, "Spectator left the match");
            true
        } else {
            false
        }
    }

    /// A paintball was fired
    pub fn on_shot(&mut self, player: PlayerId) -> bool {
        self.count_activity(player, StatKind::Shots)
    }

    /// A grenade was thrown
    pub fn on_grenade(&mut self, player: PlayerId) -> bool {
        self.count_activity(player, StatKind::Grenades)
    }

    /// An airstrike was called in
    pub fn on_airstrike(&mut self, player: PlayerId) -> bool {
        self.count_activity(player, StatKind::Airstrikes)
    }

    fn count_activity(&mut self, player: PlayerId, kind: StatKind) -> bool {
        if self.match_over || self.out.contains(&player) || !self.stats.contains_key(&player) {
            return false;
        }
        self.credit(player, &[(kind, 1)]);
        true
    }

    fn credit(&mut self, player: PlayerId, deltas: &[(StatKind, i64)]) {
        if let Some(stats) = self.stats.get_mut(&player) {
            for (kind, delta) in deltas {
                stats.add(*kind, *delta);
            }
            stats.recompute_ratios();
        }
    }
}
