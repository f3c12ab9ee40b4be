//! Routing decision
//!
//! Pure mapping from mode (plus score and declared urgency) to team,
//! priority, and disposition.

use chat_triage_core::{
    Disposition, LeadScore, ModeTag, Priority, Qualification, RoutingDecision, Team, Urgency,
};

/// Map a classified message to its routing decision.
///
/// Spam rejects immediately. Sales derives priority from the lead
/// qualification. Ticket-bearing modes default to Medium with a High-urgency
/// override. Internal and analytics modes bypass team routing.
pub fn route(mode: ModeTag, score: Option<LeadScore>, urgency: Urgency) -> RoutingDecision {
    match mode {
        ModeTag::Spam => RoutingDecision {
            mode,
            team: None,
            priority: Priority::Low,
            score: None,
            disposition: Disposition::Reject,
        },
        ModeTag::Sales => {
            let priority = match score.as_ref().map(|s| s.qualification) {
                Some(Qualification::Hot) => Priority::High,
                Some(Qualification::Warm) => Priority::Medium,
                Some(Qualification::Cold) | None => Priority::Low,
            };
            RoutingDecision {
                mode,
                team: Some(Team::Sales),
                priority,
                score,
                disposition: Disposition::Ticket,
            }
        }
        ModeTag::Billing | ModeTag::Support | ModeTag::Technical | ModeTag::Faq => {
            let team = match mode {
                ModeTag::Billing => Team::Billing,
                ModeTag::Technical => Team::Technical,
                _ => Team::Support,
            };
            let priority = if urgency == Urgency::High {
                Priority::High
            } else {
                Priority::Medium
            };
            RoutingDecision {
                mode,
                team: Some(team),
                priority,
                score: None,
                disposition: Disposition::Ticket,
            }
        }
        ModeTag::Internal | ModeTag::Analytics => RoutingDecision {
            mode,
            team: None,
            priority: Priority::Medium,
            score: None,
            disposition: Disposition::Internal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_triage_core::{ContactWindow, ScoreBreakdown};

    fn score_with(qualification: Qualification) -> LeadScore {
        LeadScore {
            total: match qualification {
                Qualification::Hot => 80,
                Qualification::Warm => 60,
                Qualification::Cold => 30,
            },
            qualification,
            contact_window: ContactWindow::OneDay,
            breakdown: ScoreBreakdown::default(),
        }
    }

    #[test]
    fn test_spam_rejects_with_no_team() {
        let decision = route(ModeTag::Spam, None, Urgency::High);
        assert!(decision.team.is_none());
        assert!(decision.is_terminal_reject());
        assert!(decision.score.is_none());
    }

    #[test]
    fn test_sales_priority_follows_qualification() {
        let hot = route(ModeTag::Sales, Some(score_with(Qualification::Hot)), Urgency::Unset);
        assert_eq!(hot.team, Some(Team::Sales));
        assert_eq!(hot.priority, Priority::High);
        assert_eq!(hot.disposition, Disposition::Ticket);

        let warm = route(ModeTag::Sales, Some(score_with(Qualification::Warm)), Urgency::Unset);
        assert_eq!(warm.priority, Priority::Medium);

        let cold = route(ModeTag::Sales, Some(score_with(Qualification::Cold)), Urgency::Unset);
        assert_eq!(cold.priority, Priority::Low);
    }

    #[test]
    fn test_direct_team_mapping() {
        assert_eq!(
            route(ModeTag::Billing, None, Urgency::Unset).team,
            Some(Team::Billing)
        );
        assert_eq!(
            route(ModeTag::Technical, None, Urgency::Unset).team,
            Some(Team::Technical)
        );
        assert_eq!(
            route(ModeTag::Support, None, Urgency::Unset).team,
            Some(Team::Support)
        );
        assert_eq!(
            route(ModeTag::Faq, None, Urgency::Unset).team,
            Some(Team::Support)
        );
    }

    #[test]
    fn test_urgency_override_for_ticket_modes() {
        let routine = route(ModeTag::Billing, None, Urgency::Medium);
        assert_eq!(routine.priority, Priority::Medium);

        let urgent = route(ModeTag::Billing, None, Urgency::High);
        assert_eq!(urgent.priority, Priority::High);
    }

    #[test]
    fn test_internal_modes_bypass_teams() {
        for mode in [ModeTag::Internal, ModeTag::Analytics] {
            let decision = route(mode, None, Urgency::High);
            assert!(decision.team.is_none());
            assert_eq!(decision.disposition, Disposition::Internal);
            assert!(!decision.is_terminal_reject());
        }
    }
}
