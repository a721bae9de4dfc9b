use crease_terminal::error::{InputKind, Rejection};
use crease_terminal::interactive::{Forum, Polls, QUESTION_SECS, QuizSession};
use crease_terminal::profile::{FavouriteKind, Favourites, MatchFormat, Profile};
use crease_terminal::seed::default_seed;

fn quiz() -> QuizSession {
    QuizSession::new(default_seed().quiz)
}

#[test]
fn quiz_scores_correct_answers_and_advances() {
    let mut quiz = quiz();
    assert_eq!(quiz.total(), 3);
    assert_eq!(quiz.current().map(|q| q.correct_answer()), Some("Brian Lara"));

    let first = quiz.answer(1).expect("question pending");
    assert!(first.correct);
    let second = quiz.answer(0).expect("question pending");
    assert!(!second.correct);
    assert_eq!(second.correct_answer, "Australia");

    assert_eq!(quiz.score(), 1);
    assert_eq!(quiz.question_number(), 3);
    assert_eq!(quiz.answers().len(), 2);
}

#[test]
fn quiz_timeout_counts_as_wrong_answer() {
    let mut quiz = quiz();
    for _ in 0..QUESTION_SECS - 1 {
        assert_eq!(quiz.tick(), None);
    }
    assert_eq!(quiz.remaining_secs(), 1);
    let outcome = quiz.tick().expect("clock ran out");
    assert!(outcome.timed_out);
    assert!(!outcome.correct);
    assert_eq!(quiz.score(), 0);
    assert_eq!(quiz.question_number(), 2);
    assert_eq!(quiz.remaining_secs(), QUESTION_SECS);
    assert_eq!(quiz.answers()[0], (1, None));
}

#[test]
fn quiz_answer_resets_the_clock() {
    let mut quiz = quiz();
    for _ in 0..10 {
        quiz.tick();
    }
    quiz.answer(1);
    assert_eq!(quiz.remaining_secs(), QUESTION_SECS);
}

#[test]
fn quiz_reset_starts_over() {
    let mut quiz = quiz();
    quiz.answer(1);
    quiz.answer(1);
    quiz.answer(1);
    assert!(quiz.is_finished());
    assert_eq!(quiz.score(), 3);

    quiz.reset();
    assert!(!quiz.is_finished());
    assert_eq!(quiz.score(), 0);
    assert!(quiz.answers().is_empty());
    assert_eq!(quiz.question_number(), 1);
}

#[test]
fn second_vote_on_a_poll_is_refused() {
    let mut polls = Polls::new(default_seed().polls);
    assert_eq!(polls.vote(1, 0), Ok(true));
    assert_eq!(polls.get(1).map(|p| p.votes[0]), Some(251));
    assert_eq!(polls.choice(1), Some(0));

    assert_eq!(polls.vote(1, 2), Err(Rejection::AlreadyVoted));
    assert_eq!(polls.get(1).map(|p| p.votes.clone()), Some(vec![251, 180, 70]));
    assert_eq!(polls.choice(1), Some(0));

    // Voting on one poll does not lock the others.
    assert_eq!(polls.vote(2, 3), Ok(true));
}

#[test]
fn unknown_poll_or_option_records_nothing() {
    let mut polls = Polls::new(default_seed().polls);
    assert_eq!(polls.vote(99, 0), Ok(false));
    assert_eq!(polls.vote(1, 7), Ok(false));
    assert_eq!(polls.choice(1), None);
    assert_eq!(polls.vote(1, 1), Ok(true));
}

#[test]
fn poll_shares_follow_vote_counts() {
    let polls = Polls::new(default_seed().polls);
    let poll = polls.get(1).expect("seeded poll");
    assert_eq!(poll.total_votes(), 500);
    assert!((poll.share(0) - 50.0).abs() < 1e-9);
    assert!((poll.share(2) - 14.0).abs() < 1e-9);
}

#[test]
fn blank_forum_post_is_refused() {
    let mut forum = Forum::new(default_seed().forum);
    assert_eq!(
        forum.post("Cricket Enthusiast", "   "),
        Err(Rejection::EmptyInput(InputKind::Post))
    );
    assert_eq!(forum.len(), 3);

    let id = forum
        .post("Cricket Enthusiast", "  Stokes at Headingley  ")
        .expect("valid post");
    assert_eq!(id, 4);
    let post = forum.posts().last().expect("post appended");
    assert_eq!(post.message, "Stokes at Headingley");
    assert_eq!(post.likes, 0);
}

#[test]
fn favourites_refuse_duplicates_and_blanks() {
    let mut teams = Favourites::from_names(&["India", "Australia"]);
    assert_eq!(teams.add("india"), Err(Rejection::AlreadyFavourite));
    assert_eq!(teams.add("  "), Err(Rejection::EmptyInput(InputKind::Favourite)));
    assert_eq!(teams.len(), 2);

    let id = teams.add(" Pakistan ").expect("new team");
    assert!(teams.contains_name("PAKISTAN"));
    let removed = teams.remove(id).expect("present");
    assert_eq!(removed.name, "Pakistan");
    assert_eq!(teams.remove(id), None);
    assert_eq!(teams.len(), 2);
}

#[test]
fn seeded_favourite_duplicates_are_skipped() {
    let players = Favourites::from_names(&["Virat Kohli", "virat kohli", "", "Steve Smith"]);
    let names: Vec<&str> = players.as_slice().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Virat Kohli", "Steve Smith"]);
}

#[test]
fn profile_keeps_team_and_player_lists_apart() {
    let mut profile = Profile::default();
    profile
        .favourites_mut(FavouriteKind::Team)
        .add("England")
        .expect("team added");
    assert_eq!(profile.favourites(FavouriteKind::Team).len(), 1);
    assert!(profile.favourites(FavouriteKind::Player).is_empty());

    assert!(profile.follows(MatchFormat::T20));
    assert!(!profile.toggle_format(MatchFormat::T20));
    assert!(!profile.follows(MatchFormat::T20));
    assert!(profile.toggle_format(MatchFormat::Test));
    assert!(profile.follows(MatchFormat::Test));
}
