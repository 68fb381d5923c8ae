use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::schema::{
    Gift, Ministry, MinistryCategory, MinistryId, PersonalityBonus, Question, Trait, TraitLean,
};
use crate::catalog::Catalog;

pub fn default_catalog() -> Catalog {
    Catalog {
        questions: default_questions(),
        ministries: default_ministries(),
        gift_ministries: default_gift_ministries(),
        personality_bonuses: default_personality_bonuses(),
        skill_verified_ministries: default_skill_verified_ministries(),
    }
}

pub fn default_questions() -> Vec<Question> {
    vec![
        // Personality
        Question::likert(
            "p1",
            "I feel energized after spending time in a large group.",
        )
        .personality(Trait::Extroversion, 1.0),
        Question::likert(
            "p2",
            "I prefer a quiet conversation with one person over a crowded room.",
        )
        .personality(Trait::Extroversion, -1.0),
        Question::likert(
            "p3",
            "I care more about how people feel than whether the job gets finished.",
        )
        .personality(Trait::PeopleFocus, 1.0),
        Question::likert("p4", "I get real satisfaction from checking tasks off a list.")
            .personality(Trait::PeopleFocus, -1.0)
            .personality(Trait::Structure, 0.5),
        Question::likert("p5", "I notice small details that others tend to miss.")
            .personality(Trait::DetailFocus, 1.0),
        Question::likert(
            "p6",
            "I enjoy imagining where things could be five years from now.",
        )
        .personality(Trait::DetailFocus, -1.0),
        Question::likert("p7", "I like to have a clear plan before I start something.")
            .personality(Trait::Structure, 1.0),
        Question::likert("p8", "I adapt easily when plans change at the last minute.")
            .personality(Trait::Structure, -1.0),
        // Gifts and ministry interest
        Question::likert("g1", "I enjoy organizing events, schedules, or systems.")
            .gift(Gift::Administration, 1.0)
            .ministry("admin", 0.8)
            .ministry("facilities", 0.3),
        Question::likert("g2", "People often look to me to set direction for a group.")
            .gift(Gift::Leadership, 1.0)
            .ministry("youth", 0.3)
            .ministry("outreach", 0.3),
        Question::likert("g3", "I enjoy explaining ideas so that others understand them.")
            .gift(Gift::Teaching, 1.0)
            .ministry("kids", 0.6)
            .ministry("youth", 0.6),
        Question::likert(
            "g4",
            "I want to walk alongside people as they grow in their faith.",
        )
        .gift(Gift::Shepherding, 1.0)
        .ministry("youth", 0.5)
        .ministry("prayer", 0.3)
        .ministry("visitation", 0.3),
        Question::likert("g5", "I am drawn to people who are hurting or in need.")
            .gift(Gift::Mercy, 1.0)
            .ministry("visitation", 0.8)
            .ministry("meals", 0.5)
            .ministry("prayer", 0.4),
        Question::likert("g6", "I love making newcomers feel at home.")
            .gift(Gift::Hospitality, 1.0)
            .ministry("greeters", 0.8)
            .ministry("welcome-table", 0.7)
            .ministry("cafe", 0.6),
        Question::likert(
            "g7",
            "I look for chances to talk about my faith with people outside church.",
        )
        .gift(Gift::Evangelism, 1.0)
        .ministry("outreach", 0.9)
        .ministry("greeters", 0.2),
        Question::likert(
            "g8",
            "I naturally notice when someone needs a word of encouragement.",
        )
        .gift(Gift::Encouragement, 1.0)
        .ministry("prayer", 0.4)
        .ministry("ushers", 0.3),
        Question::likert(
            "g9",
            "I find joy in giving my resources to support the work of the church.",
        )
        .gift(Gift::Giving, 1.0)
        .ministry("meals", 0.3)
        .ministry("outreach", 0.3),
        Question::likert("g10", "I would rather help behind the scenes than be up front.")
            .gift(Gift::Service, 1.0)
            .ministry("parking", 0.6)
            .ministry("facilities", 0.6)
            .ministry("ushers", 0.5)
            .ministry("cafe", 0.3),
        Question::likert("g11", "I express myself through music, art, or performance.")
            .gift(Gift::Creativity, 1.0)
            .ministry("worship", 0.7)
            .ministry("dance", 0.5)
            .ministry("drama", 0.5)
            .ministry("visual-art", 0.5),
        Question::likert("g12", "I like fixing, building, or working with my hands.")
            .gift(Gift::Craftsmanship, 1.0)
            .ministry("facilities", 0.8),
        Question::likert("g13", "I enjoy working with technology and equipment.")
            .gift(Gift::Craftsmanship, 0.5)
            .gift(Gift::Administration, 0.3)
            .ministry("sound", 0.8)
            .ministry("livestream", 0.8)
            .ministry("lyrics", 0.5),
        Question::likert("g14", "I enjoy spending time with children.")
            .gift(Gift::Teaching, 0.3)
            .gift(Gift::Shepherding, 0.3)
            .ministry("kids", 1.0),
        Question::likert("g15", "I enjoy capturing or designing visual media.")
            .gift(Gift::Creativity, 0.7)
            .ministry("photography", 0.7)
            .ministry("graphic-design", 0.7)
            .ministry("visual-art", 0.3),
        Question::likert("g16", "I feel comfortable praying out loud with others.")
            .gift(Gift::Mercy, 0.3)
            .gift(Gift::Encouragement, 0.3)
            .ministry("prayer", 1.0),
        Question::likert("g17", "I enjoy preparing food or serving meals.")
            .gift(Gift::Hospitality, 0.5)
            .gift(Gift::Service, 0.5)
            .ministry("meals", 0.8)
            .ministry("cafe", 0.6),
        // Skill verification
        Question::yes_no(
            "s1",
            "Do you have experience singing or playing an instrument with a group?",
        )
        .ministry("worship", 0.6)
        .verifies_skill(),
        Question::yes_no("s2", "Have you operated a sound board or other audio equipment?")
            .ministry("sound", 0.6)
            .verifies_skill(),
        Question::yes_no("s3", "Have you run a video camera or streaming software?")
            .ministry("livestream", 0.6)
            .ministry("photography", 0.3)
            .verifies_skill(),
        Question::yes_no("s4", "Have you created designs with graphic design software?")
            .ministry("graphic-design", 0.6)
            .verifies_skill(),
        Question::yes_no("s5", "Do you draw, paint, or create other visual art?")
            .ministry("visual-art", 0.6)
            .verifies_skill(),
        Question::yes_no("s6", "Do you have dance training or performance experience?")
            .ministry("dance", 0.6)
            .verifies_skill(),
        Question::yes_no("s7", "Have you acted or performed on stage?")
            .ministry("drama", 0.6)
            .verifies_skill(),
        Question::yes_no("s8", "Do you regularly shoot photos with a dedicated camera?")
            .ministry("photography", 0.6)
            .verifies_skill(),
        Question::yes_no(
            "s9",
            "Are you willing to complete a background check to serve with minors?",
        )
        .ministry("kids", 0.4)
        .ministry("youth", 0.4),
        // Logistics
        Question::choice(
            "m1",
            "When are you usually available to serve?",
            &[
                ("sunday-morning", "Sunday morning"),
                ("sunday-evening", "Sunday evening"),
                ("weekday", "Weekdays"),
                ("flexible", "Flexible"),
            ],
        ),
        Question::choice(
            "m2",
            "How often would you like to serve?",
            &[
                ("weekly", "Weekly"),
                ("twice-monthly", "Twice a month"),
                ("monthly", "Monthly"),
            ],
        )
        .optional(),
    ]
}

pub fn default_ministries() -> Vec<Ministry> {
    use MinistryCategory::*;

    vec![
        Ministry::new("greeters", "Greeters", Welcome, "Welcome people at the doors."),
        Ministry::new(
            "welcome-table",
            "Welcome Table",
            Welcome,
            "Help first-time guests get connected.",
        ),
        Ministry::new("ushers", "Ushers", Welcome, "Seat guests and assist during services."),
        Ministry::new("parking", "Parking Team", Welcome, "Direct traffic and greet arrivals."),
        Ministry::new("cafe", "Cafe", Welcome, "Serve coffee and snacks before and after services."),
        Ministry::new("worship", "Worship Team", CreativeArts, "Lead the congregation in song.")
            .with_growth_pathway(
                "Sit in on a worship rehearsal and ask the worship leader about auditions.",
            ),
        Ministry::new("dance", "Dance", CreativeArts, "Worship through choreographed movement.")
            .with_growth_pathway("Join an open dance workshop before stepping into a set."),
        Ministry::new("drama", "Drama", CreativeArts, "Tell stories on stage for services and events.")
            .with_growth_pathway("Volunteer backstage on the next production to learn the craft."),
        Ministry::new(
            "visual-art",
            "Visual Arts",
            CreativeArts,
            "Create art for worship spaces and events.",
        )
        .with_growth_pathway("Contribute a piece to the next community art night."),
        Ministry::new(
            "photography",
            "Photography",
            CreativeArts,
            "Capture moments from services and events.",
        )
        .with_growth_pathway("Shadow a team photographer at an upcoming event."),
        Ministry::new(
            "graphic-design",
            "Graphic Design",
            CreativeArts,
            "Design slides, print pieces, and social media.",
        )
        .with_growth_pathway("Take the beginner design track and assist with slide layouts."),
        Ministry::new("sound", "Sound", Production, "Mix audio for services and events.")
            .with_growth_pathway("Shadow a sound engineer during a Sunday service."),
        Ministry::new("lyrics", "Lyrics", Production, "Run song lyrics and service slides."),
        Ministry::new("livestream", "Livestream", Production, "Broadcast services online.")
            .with_growth_pathway("Attend a livestream training night and run a practice stream."),
        Ministry::new("prayer", "Prayer Team", Care, "Pray with people after services."),
        Ministry::new("meals", "Meal Ministry", Care, "Deliver meals to families in need."),
        Ministry::new(
            "visitation",
            "Hospital & Home Visits",
            Care,
            "Visit members who are sick or homebound.",
        ),
        Ministry::new("kids", "Kids Ministry", NextGeneration, "Teach and care for children."),
        Ministry::new("youth", "Youth Ministry", NextGeneration, "Mentor middle and high school students."),
        Ministry::new("outreach", "Outreach", Outreach, "Serve the community beyond the church walls."),
        Ministry::new(
            "facilities",
            "Facilities",
            Operations,
            "Set up, maintain, and repair church spaces.",
        ),
        Ministry::new("admin", "Administration", Operations, "Support staff with office and data work."),
    ]
}

pub fn default_gift_ministries() -> BTreeMap<Gift, Vec<MinistryId>> {
    let table: [(Gift, &[&str]); 12] = [
        (Gift::Administration, &["admin", "facilities", "welcome-table"]),
        (Gift::Leadership, &["youth", "outreach", "admin"]),
        (Gift::Teaching, &["kids", "youth"]),
        (Gift::Shepherding, &["youth", "visitation", "prayer"]),
        (Gift::Mercy, &["visitation", "meals", "prayer"]),
        (Gift::Hospitality, &["greeters", "welcome-table", "cafe", "ushers"]),
        (Gift::Evangelism, &["outreach", "greeters"]),
        (Gift::Encouragement, &["prayer", "ushers", "greeters"]),
        (Gift::Giving, &["meals", "outreach"]),
        (Gift::Service, &["parking", "facilities", "ushers", "cafe"]),
        (
            Gift::Creativity,
            &[
                "worship",
                "dance",
                "drama",
                "visual-art",
                "graphic-design",
                "photography",
            ],
        ),
        (Gift::Craftsmanship, &["facilities", "sound", "livestream"]),
    ];
    table
        .into_iter()
        .map(|(gift, ids)| (gift, ids.iter().map(|id| MinistryId::from(*id)).collect()))
        .collect()
}

pub fn default_personality_bonuses() -> Vec<PersonalityBonus> {
    let table: [(TraitLean, &str, f64); 9] = [
        (TraitLean::Extrovert, "greeters", 0.3),
        (TraitLean::Extrovert, "welcome-table", 0.3),
        (TraitLean::Extrovert, "outreach", 0.2),
        (TraitLean::TaskFocused, "facilities", 0.3),
        (TraitLean::TaskFocused, "sound", 0.2),
        (TraitLean::TaskFocused, "lyrics", 0.2),
        (TraitLean::DetailOriented, "sound", 0.2),
        (TraitLean::DetailOriented, "lyrics", 0.2),
        (TraitLean::DetailOriented, "graphic-design", 0.2),
    ];
    table
        .into_iter()
        .map(|(when, ministry, amount)| PersonalityBonus {
            when,
            ministry: MinistryId::from(ministry),
            amount,
        })
        .collect()
}

pub fn default_skill_verified_ministries() -> BTreeSet<MinistryId> {
    [
        "worship",
        "sound",
        "livestream",
        "graphic-design",
        "visual-art",
        "dance",
        "drama",
        "photography",
    ]
    .into_iter()
    .map(MinistryId::from)
    .collect()
}
