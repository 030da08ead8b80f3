use lptext::*;

const EPS: f64 = 0.00000001;

pub fn assert_parsed(
    result: &LpTextResult<Problem>,
    c: &[f64],
    a: &[&[f64]],
    b: &[f64],
    eqin: &[i8],
    min_max: i8,
) {
    let prob = match result {
        Ok(prob) => prob,
        Err(e) => panic!("parse failed: {}", e),
    };

    assert_close(&prob.c_vector(), c);

    let a_matrix = prob.a_matrix();
    assert_eq!(a_matrix.len(), a.len(), "A-matrix: {:?}", a_matrix);

    for (row, expected_row) in a_matrix.iter().zip(a) {
        assert_close(row, expected_row);
    }

    assert_close(&prob.b_vector(), b);
    assert_eq!(prob.eqin(), eqin);
    assert_eq!(prob.min_max(), min_max);
}

fn assert_close(x: &[f64], expected_x: &[f64]) {
    assert_eq!(x.len(), expected_x.len(), "{:?} vs {:?}", x, expected_x);

    for (x1, x2) in x.iter().zip(expected_x) {
        assert!((x1 - x2).abs() < EPS, "x_i: {}, expected: {}", x1, x2);
    }
}

pub fn assert_error<F: Fn(&LpTextError) -> bool>(result: &LpTextResult<Problem>, expected: F) {
    match result {
        Err(e) if expected(e) => (),
        _ => panic!("unexpected result: {:?}", result),
    }
}

pub struct TestProblem {
    pub text: &'static str,
    pub check_result: Box<dyn FnOnce(&LpTextResult<Problem>)>,
}

impl TestProblem {
    fn new<F: FnOnce(&LpTextResult<Problem>) + 'static>(text: &'static str, check_result: F) -> Self {
        Self {
            text,
            check_result: Box::new(check_result),
        }
    }
}

pub fn two_variables_max() -> TestProblem {
    let text = "\
max 2x1+3x2
st
x1+x2<=4
x1+3x2<=6
end
";

    TestProblem::new(text, |result| {
        assert_parsed(result, &[2., 3.], &[&[1., 1.], &[1., 3.]], &[4., 6.], &[-1, -1], 1)
    })
}

pub fn three_variables_min() -> TestProblem {
    let text = "\
min 3x1 +2x2 -x3
st
 x1 + x2 + x3 >= 10
-2x1 + 0.5x3 = 0
 x2 - x3 <= 7
end
";

    TestProblem::new(text, |result| {
        assert_parsed(
            result,
            &[3., 2., -1.],
            &[&[1., 1., 1.], &[-2., 0., 0.5], &[0., 1., -1.]],
            &[10., 0., 7.],
            &[1, 0, -1],
            -1,
        )
    })
}

pub fn blank_lines_and_comments_before() -> TestProblem {
    let text = "
some description of the problem

  max 1.5x1 + x2

st

   x1 <= 3

   x2 <= 2


end
";

    TestProblem::new(text, |result| {
        assert_parsed(result, &[1.5, 1.], &[&[1., 0.], &[0., 1.]], &[3., 2.], &[-1, -1], 1)
    })
}

pub fn crlf_line_endings() -> TestProblem {
    let text = "max x1 + x2\r\nst\r\nx1 + x2 <= 1\r\nend\r\n";

    TestProblem::new(text, |result| {
        assert_parsed(result, &[1., 1.], &[&[1., 1.]], &[1.], &[-1], 1)
    })
}

pub fn constraint_on_st_line() -> TestProblem {
    let text = "max 4y1 + 2y2\nst 3y1 <= 12\ny1 + y2 <= 5\nend\n";

    TestProblem::new(text, |result| {
        assert_parsed(result, &[4., 2.], &[&[3., 0.], &[1., 1.]], &[12., 5.], &[-1, -1], 1)
    })
}

pub fn variable_only_in_constraints() -> TestProblem {
    let text = "min x1\nst\nx1 - s1 = 2\nx1 + s2 = 8\nend\n";

    TestProblem::new(text, |result| {
        assert_parsed(
            result,
            &[1., 0., 0.],
            &[&[1., -1., 0.], &[1., 0., 1.]],
            &[2., 8.],
            &[0, 0],
            -1,
        )
    })
}

pub fn no_constraints() -> TestProblem {
    let text = "max x1 + x2\nst\nend\n";

    TestProblem::new(text, |result| {
        assert_parsed(result, &[1., 1.], &[], &[], &[], 1)
    })
}

pub fn objective_keyword_touching_terms() -> TestProblem {
    let text = "max2x1+3x2\nst\nx1+x2<=4\nend\n";

    TestProblem::new(text, |result| {
        assert_parsed(result, &[2., 3.], &[&[1., 1.]], &[4.], &[-1], 1)
    })
}

pub fn signed_objective_after_keyword() -> TestProblem {
    let text = "min-x1+x2\nst\nx1>=1\nend\n";

    TestProblem::new(text, |result| {
        assert_parsed(result, &[-1., 1.], &[&[1., 0.]], &[1.], &[1], -1)
    })
}

pub fn plus_after_keyword() -> TestProblem {
    let text = "max+x1\nst\nx1<=3\nend\n";

    TestProblem::new(text, |result| {
        assert_parsed(result, &[1.], &[&[1.]], &[3.], &[-1], 1)
    })
}

pub fn missing_objective() -> TestProblem {
    let text = "2x1 + 3x2\nst\nx1 <= 4\nend\n";

    TestProblem::new(text, |result| {
        assert_error(result, |e| matches!(e, LpTextError::MissingObjective))
    })
}

pub fn missing_constraint_keyword() -> TestProblem {
    let text = "max x1\nsubject\nx1 <= 4\nend\n";

    TestProblem::new(text, |result| {
        assert_error(result, |e| matches!(e, LpTextError::MissingConstraintKeyword))
    })
}

pub fn unrecognized_relation() -> TestProblem {
    let text = "max x1\nst\nx1 =< 4\nend\n";

    TestProblem::new(text, |result| {
        assert_error(result, |e| {
            matches!(e, LpTextError::UnrecognizedRelationSymbol { line: 3, symbol } if symbol == "=<")
        })
    })
}

pub fn fractional_rhs() -> TestProblem {
    let text = "max x1\nst\nx1 <= 2.5\nend\n";

    TestProblem::new(text, |result| {
        assert_error(result, |e| {
            matches!(e, LpTextError::UnexpectedToken { line: 3, text } if text == ".5")
        })
    })
}

pub fn missing_end() -> TestProblem {
    let text = "max x1\nst\nx1 <= 4\n";

    TestProblem::new(text, |result| {
        assert_parsed(result, &[1.], &[&[1.]], &[4.], &[-1], 1)
    })
}

pub fn missing_end_required() -> TestProblem {
    let text = "max x1\nst\nx1 <= 4\n";

    TestProblem::new(text, |result| {
        assert_error(result, |e| matches!(e, LpTextError::MissingEnd))
    })
}
