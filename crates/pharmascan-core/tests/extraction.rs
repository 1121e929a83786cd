use pretty_assertions::assert_eq;
use quick_xml::Reader;
use quick_xml::events::Event;

use pharmascan_core::order::IdEmailAnchor;
use pharmascan_core::{
    FIELD_NAMES, Field, HeuristicOrderParser, OrderParser, OrderRecord, RecordStartDetector,
    clean_text, generate_csv, generate_xml,
};

const PAGE: &str = "\
PHARMACY ORDER EXPORT - PAGE 1
12345 JOHN DOE john.doe@mail.com 555-123-4567 MALE 01/02/1980
44 Elm Street Austin TX 73301
PHENTERMINE 37.5mg x 30 $45.00 shipping $15.00 total $120.00

54321 MARY ANN SMITH mary.smith@example.org (512) 555-0199 FEMALE 3-4-75 06/15/2024
123 Main Rd CA 90210
XANAX 1mg $89.99
";

fn parse(text: &str) -> Vec<OrderRecord> {
    HeuristicOrderParser::new().parse(text, "page1.png", 1).records
}

#[test]
fn test_single_line_record() {
    let records = parse("12345 JOHN DOE john.doe@mail.com 555-123-4567 MALE 01/02/1980 90210");
    assert_eq!(records.len(), 1);

    let r = &records[0];
    assert_eq!(r.get(Field::UserId), "12345");
    assert_eq!(r.get(Field::CustomerName), "JOHN DOE");
    assert_eq!(r.get(Field::EmailAddress), "john.doe@mail.com");
    assert_eq!(r.get(Field::PhNo1), "555-123-4567");
    assert_eq!(r.get(Field::PhNo2), "");
    assert_eq!(r.get(Field::Sex1), "MALE");
    assert_eq!(r.get(Field::Dob), "01/02/1980");
    assert_eq!(r.get(Field::DBirth), "01/02/1980");
    assert_eq!(r.get(Field::Zip1), "90210");
    assert_eq!(r.get(Field::ImageName), "page1.png");
    assert_eq!(r.get(Field::RecordNo), "1");
}

#[test]
fn test_full_page() {
    let records = parse(PAGE);
    assert_eq!(records.len(), 2);

    let john = &records[0];
    assert_eq!(john.get(Field::City1), "Austin");
    assert_eq!(john.get(Field::State1), "TX");
    assert_eq!(john.get(Field::Zip1), "73301");
    assert_eq!(john.get(Field::TotalAmount), "$120.00");
    assert_eq!(john.get(Field::Medicine), "PHENTERMINE");
    assert_eq!(john.get(Field::CreateDate), "");

    let mary = &records[1];
    assert_eq!(mary.get(Field::CustomerName), "MARY ANN SMITH");
    assert_eq!(mary.get(Field::PhNo1), "(512) 555-0199");
    assert_eq!(mary.get(Field::Sex1), "FEMALE");
    assert_eq!(mary.get(Field::DBirth), "3-4-75");
    assert_eq!(mary.get(Field::CreateDate), "06/15/2024");
    assert_eq!(mary.get(Field::State1), "CA");
    assert_eq!(mary.get(Field::City1), "");
    assert_eq!(mary.get(Field::Zip1), "90210");
    assert_eq!(mary.get(Field::TotalAmount), "$89.99");
    assert_eq!(mary.get(Field::Medicine), "XANAX");
    assert_eq!(mary.get(Field::RecordNo), "2");
}

#[test]
fn test_groups_hold_only_their_own_lines() {
    let text = "\
11111 ANN LEE ann@lee.com
filler for ann 01/01/1990
more filler $10.00
22222 BOB KAY bob@kay.com
filler for bob $20.00";
    let records = parse(text);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get(Field::TotalAmount), "$10.00");
    assert_eq!(records[0].get(Field::Dob), "01/01/1990");
    assert_eq!(records[1].get(Field::TotalAmount), "$20.00");
    assert_eq!(records[1].get(Field::Dob), "");
}

#[test]
fn test_last_dollar_amount_is_total() {
    let records = parse("12345 JOHN DOE john@mail.com pills $45.00 then total $120.00");
    assert_eq!(records[0].get(Field::TotalAmount), "$120.00");
}

#[test]
fn test_empty_input() {
    let result = HeuristicOrderParser::new().parse("", "empty.png", 1);
    assert!(result.records.is_empty());
    assert_eq!(result.next_record_no, 1);
}

#[test]
fn test_street_suffix_leaves_city_empty() {
    let records = parse("12345 JANE ROE jane@mail.com 123 Main Rd CA 90210");
    let r = &records[0];
    assert_eq!(r.get(Field::City1), "");
    assert_eq!(r.get(Field::State1), "CA");
    assert_eq!(r.get(Field::Zip1), "90210");
}

#[test]
fn test_state_zip_fallback() {
    // The standalone zip pass skips the ID; the state pair supplies the zip
    let records = parse("90210 JANE ROE jane@mail.com Beverly Hills CA 90210");
    let r = &records[0];
    assert_eq!(r.get(Field::UserId), "90210");
    assert_eq!(r.get(Field::Zip1), "90210");
    assert_eq!(r.get(Field::City1), "Hills");
}

#[test]
fn test_female_beats_male() {
    let records = parse("12345 JO DOE jo@mail.com MALE FEMALE");
    assert_eq!(records[0].get(Field::Sex1), "FEMALE");

    let records = parse("12345 JO DOE jo@mail.com FEMALE MALE");
    assert_eq!(records[0].get(Field::Sex1), "FEMALE");
}

#[test]
fn test_record_count_bounded_by_start_lines() {
    let texts = [
        PAGE,
        "",
        "no anchors\nanywhere",
        "12345 a@b.co\n12345 a@b.co\n12345 JOHN DOE john@mail.com",
        "leading\n12345 X Y x@y.com\n\n\n54321 Z z@z.com filler filler",
    ];
    let anchor = IdEmailAnchor;

    for text in texts {
        let starts = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && anchor.is_record_start(l))
            .count();
        let records = parse(text);
        assert!(records.len() <= starts, "{text:?}");
    }
}

#[test]
fn test_short_groups_never_emitted() {
    let parser = HeuristicOrderParser::new();
    let text = "12345 a@b.co\n54321 c@d.io x\n11111 JOHN DOE john@mail.com";
    let seg = parser.segmenter().segment(text);

    assert_eq!(seg.stats.dropped_groups, 2);
    assert!(seg.groups.iter().all(|g| clean_text(&g.text()).len() >= 20));
    assert_eq!(parser.parse(text, "p.png", 1).records.len(), 1);
}

#[test]
fn test_extraction_is_deterministic() {
    let parser = HeuristicOrderParser::new();
    let first = parser.parse(PAGE, "page1.png", 7);
    let second = parser.parse(PAGE, "page1.png", 7);

    assert_eq!(first, second);
    assert_eq!(generate_csv(&first.records).unwrap(), generate_csv(&second.records).unwrap());
}

#[test]
fn test_counter_threads_across_images() {
    let parser = HeuristicOrderParser::new();
    let first = parser.parse(PAGE, "page1.png", 1);
    let second = parser.parse(PAGE, "page2.png", first.next_record_no);

    assert_eq!(second.records[0].record_no(), Some(3));
    assert_eq!(second.records[1].record_no(), Some(4));
    assert_eq!(second.next_record_no, 5);
}

#[test]
fn test_serializers_survive_hostile_values() {
    let records = parse("12345 O'NEIL & \"SONS\" <LLC> oneil@mail.com, Dallas, TX 75201");
    let r = &records[0];
    assert_eq!(r.get(Field::CustomerName), "O'NEIL & \"SONS\" <LLC");

    let csv = generate_csv(&records).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(row.len(), FIELD_NAMES.len());
    assert_eq!(&row[Field::CustomerName.index()], "O'NEIL & \"SONS\" <LLC");

    let xml = generate_xml(&records).unwrap();
    assert!(xml.contains(
        "<CustomerName>O&apos;NEIL &amp; &quot;SONS&quot; &lt;LLC</CustomerName>"
    ));
    assert!(xml.contains("<City_1>Dallas</City_1>"));
}

/// Read `(column, value)` pairs back per record from rendered XML.
fn read_xml_records(xml: &str) -> Vec<Vec<(String, String)>> {
    let mut reader = Reader::from_str(xml);
    let mut records = Vec::new();
    let mut current: Vec<(String, String)> = Vec::new();
    let mut value = String::new();

    loop {
        match reader.read_event().unwrap() {
            Event::Start(_) => value.clear(),
            Event::Text(text) => value.push_str(&text.unescape().unwrap()),
            Event::End(end) => {
                let name = String::from_utf8(end.name().as_ref().to_vec()).unwrap();
                match name.as_str() {
                    "DataM" => records.push(std::mem::take(&mut current)),
                    "Root" => {}
                    _ => current.push((name, std::mem::take(&mut value))),
                }
                value.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }
    records
}

#[test]
fn test_xml_values_read_back_unchanged() {
    let mut records = parse(PAGE);
    records.extend(parse(
        "12345 O'NEIL & \"SONS\" <LLC> oneil@mail.com, Dallas, TX 75201 total $9.99",
    ));
    let records: Vec<OrderRecord> = records
        .into_iter()
        .map(|r| r.with_field(Field::Remarks, "a<b & c>d \"q\" 'x'"))
        .collect();

    let parsed = read_xml_records(&generate_xml(&records).unwrap());
    assert_eq!(parsed.len(), records.len());

    for (record, fields) in records.iter().zip(&parsed) {
        let expected: Vec<(String, String)> = record
            .iter()
            .map(|(f, v)| (f.name().to_string(), v.to_string()))
            .collect();
        assert_eq!(fields, &expected);
    }
}
