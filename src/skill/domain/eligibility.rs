//! Skill coverage rule for task assignment.

use super::SkillId;
use std::collections::HashSet;

/// Returns `true` when `held` contains every skill in `required`.
///
/// An empty requirement is covered by anyone. Levels are not considered;
/// holding a skill at any level counts.
#[must_use]
pub fn covers_required_skills(
    required: &[SkillId],
    held: impl IntoIterator<Item = SkillId>,
) -> bool {
    if required.is_empty() {
        return true;
    }
    let held_set: HashSet<SkillId> = held.into_iter().collect();
    required.iter().all(|skill_id| held_set.contains(skill_id))
}
