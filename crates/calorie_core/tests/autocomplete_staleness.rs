use calorie_core::autocomplete::{highlight, render_marked, Autocomplete, Focus};
use calorie_core::SuggestionResult;

fn hits(query: &str) -> Vec<SuggestionResult> {
    vec![SuggestionResult::new(format!("{query}-hit"), 100.0, vec![0])]
}

#[test]
fn only_last_issued_query_is_ever_rendered() {
    // Every completion order of three overlapping queries.
    let orders = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    for order in orders {
        let mut autocomplete = Autocomplete::new();
        let requests: Vec<_> = ["b", "ba", "ban"]
            .iter()
            .map(|text| autocomplete.on_text_changed(*text).unwrap())
            .collect();

        for index in order {
            let request = &requests[index];
            autocomplete.on_results(request.ticket, hits(&request.query));
            if let Some(shown) = autocomplete.suggestions().first() {
                assert_eq!(shown.name, "ban-hit", "order {order:?}");
            }
        }
        assert_eq!(autocomplete.suggestions()[0].name, "ban-hit");
    }
}

#[test]
fn keyboard_wraps_in_both_directions() {
    let mut autocomplete = Autocomplete::new();
    let request = autocomplete.on_text_changed("c").unwrap();
    autocomplete.on_results(
        request.ticket,
        vec![
            SuggestionResult::new("cake", 300.0, vec![0]),
            SuggestionResult::new("candy", 150.0, vec![0]),
            SuggestionResult::new("cola", 140.0, vec![0]),
        ],
    );

    let mut visited = Vec::new();
    for _ in 0..5 {
        autocomplete.focus_next();
        visited.push(autocomplete.focus().index().unwrap());
    }
    assert_eq!(visited, [0, 1, 2, 0, 1]);

    autocomplete.close();
    assert_eq!(autocomplete.focus(), Focus::Unfocused);
    let request = autocomplete.on_text_changed("co").unwrap();
    autocomplete.on_results(
        request.ticket,
        vec![
            SuggestionResult::new("cola", 140.0, vec![0, 1]),
            SuggestionResult::new("cookie", 200.0, vec![0, 1]),
            SuggestionResult::new("corn", 90.0, vec![0, 1]),
        ],
    );
    autocomplete.focus_previous();
    assert_eq!(autocomplete.focus(), Focus::Focused(2));
}

#[test]
fn highlight_marks_matched_characters() {
    let segments = highlight("apple", &[0, 2]);
    assert_eq!(render_marked(&segments, "(", ")"), "(a)p(p)le");
}
