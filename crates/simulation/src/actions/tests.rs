use super::*;
use crate::constraint::Aggregate;
use crate::stats::SizeClass;

#[test]
fn test_action_serialization() {
    let action = Action::Build {
        index: 7,
        building: BuildingType::Commercial,
        footprint: Footprint::Deep,
    };
    let json = serde_json::to_string(&action).unwrap();
    let decoded: Action = serde_json::from_str(&json).unwrap();
    assert_eq!(action, decoded);
}

#[test]
fn test_action_result_serialization() {
    let res = ActionResult::Refused(ActionError::Forbidden(Aggregate::TypeSize(
        BuildingType::Residential,
        SizeClass::Quad,
    )));
    let json = serde_json::to_string(&res).unwrap();
    let decoded: ActionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(res, decoded);

    let res = ActionResult::Applied(AppliedAction::StoryAdded {
        index: 3,
        stories: 2,
    });
    let json = serde_json::to_string(&res).unwrap();
    let decoded: ActionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(res, decoded);
}

#[test]
fn test_applied_action_cues() {
    use crate::audio_cues::SfxCue;

    let built = AppliedAction::Built {
        index: 0,
        building: BuildingType::Commercial,
        footprint: Footprint::Single,
    };
    assert_eq!(built.cue(), SfxCue::Build(BuildingType::Commercial));
    assert_eq!(
        AppliedAction::Demolished {
            index: 0,
            building: BuildingType::Residential
        }
        .cue(),
        SfxCue::Demolish
    );
}

#[test]
fn test_result_from_engine_outcome() {
    let res: ActionResult = Err(ActionError::MaxHeight).into();
    assert_eq!(res.error(), Some(ActionError::MaxHeight));
    assert!(!res.is_applied());
    assert_eq!(Action::AddStory { index: 4 }.index(), 4);
}
