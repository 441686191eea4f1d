//! The `video` activity component: its first-install tables and every
//! upgrade step released since.

use crate::error::MigrateResult;
use vidmod_core::{
    ColumnOperation as Op, ColumnSpec, Component, ComponentName, MigrationStep, TableSpec,
};

const VIDEO: &str = "video";
const SESSION: &str = "video_session";

fn flag(name: &str, default: &str, after: &str) -> ColumnSpec {
    ColumnSpec::integer(name, 1)
        .not_null()
        .default_value(default)
        .after(after)
}

fn baseline() -> Vec<TableSpec> {
    vec![
        TableSpec::new(
            VIDEO,
            vec![
                ColumnSpec::integer("id", 10).not_null(),
                ColumnSpec::integer("course", 10).not_null().default_value("0"),
                ColumnSpec::char("name", 255).not_null().default_value(""),
                ColumnSpec::text("intro"),
                ColumnSpec::integer("introformat", 4).not_null().default_value("0"),
                ColumnSpec::integer("timecreated", 10).not_null().default_value("0"),
                ColumnSpec::integer("timemodified", 10).not_null().default_value("0"),
                ColumnSpec::char("type", 20).default_value("vimeo"),
                ColumnSpec::char("url", 1000),
            ],
        ),
        TableSpec::new(
            SESSION,
            vec![
                ColumnSpec::integer("id", 10).not_null(),
                ColumnSpec::integer("cmid", 10).not_null().default_value("0"),
                ColumnSpec::integer("userid", 10).not_null().default_value("0"),
                ColumnSpec::integer("watchtime", 10).not_null().default_value("0"),
                ColumnSpec::integer("timecreated", 10).not_null().default_value("0"),
            ],
        ),
    ]
}

fn steps() -> Vec<MigrationStep> {
    vec![
        MigrationStep::new(
            2022060600,
            "Per-source URL columns replace url",
            vec![
                Op::add(VIDEO, ColumnSpec::char("youtubeurl", 1000).after("type")),
                Op::add(VIDEO, ColumnSpec::char("vimeourl", 1000).after("youtubeurl")),
                Op::add(VIDEO, ColumnSpec::char("externalurl", 1000).after("vimeourl")),
                Op::drop(VIDEO, "url"),
            ],
        ),
        MigrationStep::new(
            2022061200,
            "YouTube and Vimeo ids",
            vec![
                Op::add(VIDEO, ColumnSpec::char("youtubeid", 100).after("youtubeurl")),
                Op::add(VIDEO, ColumnSpec::char("vimeoid", 100).after("vimeourl")),
            ],
        ),
        MigrationStep::new(
            2022061201,
            "Source-independent video id",
            vec![Op::add(VIDEO, ColumnSpec::char("videoid", 100).after("type"))],
        ),
        MigrationStep::new(
            2022061600,
            "Player options",
            vec![
                Op::add(VIDEO, flag("debug", "0", "videoid")),
                Op::add(VIDEO, ColumnSpec::text("controls").after("debug")),
                Op::add(VIDEO, flag("autoplay", "0", "controls")),
                Op::add(VIDEO, flag("disablecontextmenu", "1", "autoplay")),
                Op::add(
                    VIDEO,
                    ColumnSpec::integer("hidecontrols", 1)
                        .default_value("1")
                        .after("disablecontextmenu"),
                ),
                Op::add(VIDEO, flag("fullscreenenabled", "1", "hidecontrols")),
                Op::add(VIDEO, flag("loop", "0", "fullscreenenabled")),
            ],
        ),
        MigrationStep::new(
            2022061601,
            "Rename loop to loopvideo",
            vec![Op::rename(VIDEO, "loop", "loopvideo")],
        ),
        MigrationStep::new(
            2022061800,
            "Session modification tracking",
            vec![
                Op::add(
                    SESSION,
                    ColumnSpec::integer("usermodified", 10)
                        .not_null()
                        .default_value("0")
                        .after("timecreated"),
                ),
                Op::add(
                    SESSION,
                    ColumnSpec::integer("timemodified", 10)
                        .not_null()
                        .default_value("0")
                        .after("usermodified"),
                ),
            ],
        ),
        MigrationStep::new(
            2022061900,
            "Forward seeking prevention",
            vec![Op::add(VIDEO, flag("preventfowardseeking", "0", "loopvideo"))],
        ),
        MigrationStep::new(
            2022062000,
            "Fix preventforwardseeking spelling",
            vec![Op::rename(
                VIDEO,
                "preventfowardseeking",
                "preventforwardseeking",
            )],
        ),
        MigrationStep::new(
            2022072900,
            "Completion rules",
            vec![
                Op::add(VIDEO, flag("completiononplay", "0", "preventforwardseeking")),
                Op::add(VIDEO, flag("completiononpercent", "0", "completiononplay")),
                Op::add(
                    VIDEO,
                    ColumnSpec::integer("completionpercent", 3)
                        .not_null()
                        .default_value("100")
                        .after("completiononpercent"),
                ),
                Op::add(VIDEO, flag("completiononviewtime", "0", "completionpercent")),
                Op::add(
                    VIDEO,
                    ColumnSpec::integer("completionviewtime", 10)
                        .not_null()
                        .default_value("0")
                        .after("completiononviewtime"),
                ),
            ],
        ),
        MigrationStep::new(
            2023101701,
            "Resume playback",
            vec![Op::add(VIDEO, flag("resume", "0", "completionviewtime"))],
        ),
        MigrationStep::new(
            2023101702,
            "Resume playback by default",
            vec![Op::change_default(VIDEO, "resume", Some("1"))],
        ),
    ]
}

/// The `video` component.
pub fn video() -> MigrateResult<Component> {
    let component = Component::new(ComponentName::new(VIDEO), baseline(), steps())?;
    Ok(component)
}
