use hbxml_osu::{convert_str, ChartErrorKind, ConvertOptions};

const CHART: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<hexis-chart>
  <meta title="Test Song" artist="Tester" version="Hard" creator="mapper" source="" tags="test chart"/>
  <general audioFilename="song.mp3" audioLeadIn="0" previewOffset="1000" letterboxDuringBreaks="false"/>
  <difficulty hpDrainRate="5" circleSize="4" overallDifficulty="7" approachRate="8.5" sliderMultiplier="1.4" sliderTickRate="1"/>
  <events>
    <background filename="bg.jpg"/>
    <break offset="5000" endOffset="7000"/>
  </events>
  <timing-points>
    <timing-point offset="0" bpm="120" inherited="false" sampleSet="1" volume="80"/>
    <timing-point offset="2000" sliderMultiplier="2" volume="80" special="true"/>
    <timing-point offset="4000" sliderMultiplier="1"/>
  </timing-points>
  <colours>
    <combo red="255" green="0" blue="0"/>
    <combo red="0" green="128" blue="255"/>
  </colours>
  <hit-objects>
    <!-- the first object never carries the new combo bit -->
    <hit-object type="1" x="100" y="100" offset="500" newCombo="true" hitsound="0"/>
    <hit-object type="2" x="200" y="150" offset="1000" newCombo="true" hitsound="2" curve="p" backtracks="1" length="120" endsounds="8|4">
      <point x="250" y="200"/>
      <point x="300" y="150"/>
    </hit-object>
    <hit-object type="1" x="300" y="300" offset="2000" hitsound="8"/>
    <hit-object type="4" x="256" y="192" offset="3000" endOffset="4500" hitsound="4"/>
    <hit-object type="8" x="64" y="100" offset="8000" endOffset="8500" hitsound="2"/>
  </hit-objects>
</hexis-chart>
"#;

const EXPECTED_HEAD: &str = "osu file format v14

[General]
AudioFilename: song.mp3
AudioLeadIn: 0
PreviewTime: 1000
Countdown: 0
SampleSet: Normal
StackLeniency: 0.7
Mode: 0
LetterboxInBreaks: 0
WidescreenStoryboard: 1

[Editor]
DistanceSpacing: 1
BeatDivisor: 2
GridSize: 8
TimelineZoom: 1

[Metadata]
Title:Test Song
TitleUnicode:Test Song
Artist:Tester
ArtistUnicode:Tester
Creator:mapper
Version:Hard
Source:
Tags:test chart
BeatmapID:0
BeatmapSetID:-1

[Difficulty]
HPDrainRate:5
CircleSize:4
OverallDifficulty:7
ApproachRate:8.5
SliderMultiplier:1.4
SliderTickRate:1

";

const EXPECTED_TAIL: &str = "[Events]
//Background and Video events
0,0,\"bg.jpg\",0,0
//Break Periods
2,5000,7000
//Storyboard Layer 0 (Background)
//Storyboard Layer 1 (Fail)
//Storyboard Layer 2 (Pass)
//Storyboard Layer 3 (Foreground)
//Storyboard Sound Samples
//Background Colour Transformations
3,100,163,162,255

[TimingPoints]
0,500.0,1,1,1,80,1,0
2000,-50.0,2,1,1,80,0,1
4000,-100,1,1,1,100,0,0

[Colours]
Combo1 : 255,0,0
Combo2 : 0,128,255

[HitObjects]
100,100,500,1,0,0:0:0:0:
200,150,1000,6,0,P|200:150|250:200|300:150,2,120,26|22|18,0:0|0:0|0:0,0:0:0:0:
300,300,2000,1,8,0:0:0:0:
256,192,3000,12,4,4500,0:0:0:0:
256,192,8000,128,2,8500,0:0:0:0
";

#[test]
fn full_chart() {
    let beatmap = convert_str("test.hbxml", CHART, &ConvertOptions::default()).unwrap();
    assert_eq!(beatmap.to_osu_string(), format!("{EXPECTED_HEAD}{EXPECTED_TAIL}"));
}

#[test]
fn full_chart_without_base_edge_hitsound() {
    let options = ConvertOptions {
        base_hitsound_on_edges: false,
    };
    let output = convert_str("test.hbxml", CHART, &options).unwrap().to_osu_string();

    let slider = output.lines().find(|line| line.starts_with("200,150,1000")).unwrap();
    assert_eq!(
        slider,
        "200,150,1000,6,0,P|200:150|250:200|300:150,2,120,24|20|16,0:0|0:0|0:0,0:0:0:0:"
    );
}

fn hit_object_lines(chart: &str) -> Vec<String> {
    let output = convert_str("objects.hbxml", chart, &ConvertOptions::default())
        .unwrap()
        .to_osu_string();

    output
        .lines()
        .skip_while(|line| *line != "[HitObjects]")
        .skip(1)
        .map(str::to_owned)
        .collect()
}

#[test]
fn sole_tap_keeps_its_hitsound() {
    let lines = hit_object_lines(
        r#"<chart><meta/><general/><difficulty/>
            <hit-object type="1" x="10" y="20" offset="300" newCombo="false" hitsound="4"/>
        </chart>"#,
    );
    assert_eq!(lines, ["10,20,300,1,4,0:0:0:0:"]);
}

#[test]
fn holds_and_spinners_have_fixed_types() {
    let lines = hit_object_lines(
        r#"<chart><meta/><general/><difficulty/>
            <hit-object type="1" x="10" y="20" offset="0"/>
            <hit-object type="8" x="10" y="20" offset="100" endOffset="200" newCombo="true"/>
            <hit-object type="4" x="256" y="192" offset="300" endOffset="900" newCombo="true"/>
            <hit-object type="4" x="256" y="192" offset="1000" endOffset="1500"/>
        </chart>"#,
    );
    assert_eq!(
        lines,
        [
            "10,20,0,1,0,0:0:0:0:",
            "256,192,100,128,0,200,0:0:0:0",
            "256,192,300,12,0,900,0:0:0:0:",
            "256,192,1000,12,0,1500,0:0:0:0:",
        ]
    );
}

#[test]
fn uninherited_point_keeps_its_multiplier() {
    let output = convert_str(
        "timing.hbxml",
        r#"<chart><meta/><general/><difficulty/>
            <timing-point offset="0" bpm="120" inherited="false" sliderMultiplier="2"/>
        </chart>"#,
        &ConvertOptions::default(),
    )
    .unwrap()
    .to_osu_string();

    assert!(output.contains("[TimingPoints]\n0,500.0,2,1,1,100,1,0\n"));
}

#[test]
fn huge_repeat_count_is_rejected() {
    let err = convert_str(
        "slider.hbxml",
        r#"<chart><meta/><general/><difficulty/><hit-object type="2" offset="0" backtracks="4294967295"/></chart>"#,
        &ConvertOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err.kind,
        ChartErrorKind::MalformedNumericField { attribute: "backtracks", .. }
    ));
}

#[test]
fn empty_chart() {
    let chart = r#"<chart><meta/><general/><difficulty/></chart>"#;
    let output = convert_str("empty.hbxml", chart, &ConvertOptions::default())
        .unwrap()
        .to_osu_string();

    let lines: Vec<_> = output.lines().collect();
    assert!(lines.contains(&"AudioFilename: audio.mp3"));
    assert!(lines.contains(&"PreviewTime: -1"));
    assert!(lines.contains(&"Title:Unknown"));
    assert!(lines.contains(&"HPDrainRate:5"));
    assert!(lines.contains(&"SliderMultiplier:1"));
    assert!(output.contains("[TimingPoints]\n\n[Colours]\n\n[HitObjects]\n"));
    assert!(output.ends_with("[HitObjects]\n"));
}

#[test]
fn slider_edges_follow_repeat_count() {
    for backtracks in 0..5_usize {
        let chart = format!(
            r#"<chart><meta/><general/><difficulty/>
                <hit-object type="2" x="0" y="0" offset="0" backtracks="{backtracks}" endsounds="2|2|2">
                    <point x="10" y="10"/>
                </hit-object>
            </chart>"#
        );
        let output = convert_str("slider.hbxml", &chart, &ConvertOptions::default())
            .unwrap()
            .to_osu_string();

        let slider = output.lines().last().unwrap();
        let fields: Vec<_> = slider.split(',').collect();
        assert_eq!(fields[6], (backtracks + 1).to_string());
        assert_eq!(fields[8].split('|').count(), backtracks + 2);
        assert_eq!(fields[9].split('|').count(), backtracks + 2);
    }
}

#[test]
fn failures_are_reported() {
    let missing = convert_str("a.hbxml", "<chart><meta/><general/></chart>", &ConvertOptions::default());
    assert_eq!(missing.unwrap_err().kind, ChartErrorKind::MissingRequiredSection("difficulty"));

    let malformed = convert_str(
        "b.hbxml",
        r#"<chart><meta/><general/><difficulty circleSize="big"/></chart>"#,
        &ConvertOptions::default(),
    );
    assert!(matches!(
        malformed.unwrap_err().kind,
        ChartErrorKind::MalformedNumericField { attribute: "circleSize", .. }
    ));

    let unsupported = convert_str(
        "c.hbxml",
        r#"<chart><meta/><general/><difficulty/><hit-object type="16"/></chart>"#,
        &ConvertOptions::default(),
    );
    assert_eq!(
        unsupported.unwrap_err().kind,
        ChartErrorKind::UnsupportedObjectKind("16".to_owned())
    );

    let broken = convert_str("d.hbxml", "<chart><meta></chart>", &ConvertOptions::default());
    assert!(matches!(
        broken.unwrap_err().kind,
        ChartErrorKind::MismatchedClosingTag { .. }
    ));
}
