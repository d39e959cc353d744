use super::Dfa;

pub(crate) struct Partition {
    /// Class id of each pre-minimization state. Ids are contiguous from 0.
    pub class_of: Vec<usize>,
    pub classes: usize,
}

/// Hopcroft partition refinement over a complete DFA: computes the
/// coarsest partition in which no two states of a class are distinguished
/// by any word.
///
/// The initial partition is ⟨accepting, rejecting⟩; if either side is
/// empty all states collapse into a single class. The worklist starts with
/// the smaller side (ties go to the accepting block) and splitting keeps
/// the smaller-half rule: a block already queued keeps its id and the new
/// half is queued too, otherwise the smaller of the two halves is queued,
/// with ties going to the new half.
pub(crate) fn partition(dfa: &Dfa) -> Partition {
    let state_count = dfa.states.len();
    let symbol_count = dfa.alphabet.len();

    let accepting: Vec<usize> = (0..state_count)
        .filter(|&s| dfa.states[s].accepting)
        .collect();
    let rejecting: Vec<usize> = (0..state_count)
        .filter(|&s| !dfa.states[s].accepting)
        .collect();
    if accepting.is_empty() || rejecting.is_empty() {
        return Partition {
            class_of: vec![0; state_count],
            classes: 1,
        };
    }

    // inverse[symbol][target] lists the states entering `target` on `symbol`
    let mut inverse = vec![vec![Vec::new(); state_count]; symbol_count];
    for (source, state) in dfa.states.iter().enumerate() {
        for (symbol, &target) in state.transitions.iter().enumerate() {
            inverse[symbol][target].push(source);
        }
    }

    let mut class_of = vec![0usize; state_count];
    for &state in &rejecting {
        class_of[state] = 1;
    }
    let mut worklist = if accepting.len() <= rejecting.len() {
        vec![0]
    } else {
        vec![1]
    };
    let mut blocks: Vec<Vec<usize>> = vec![accepting, rejecting];

    let mut marked = vec![false; state_count];
    let mut touched: Vec<usize> = Vec::new();

    while let Some(splitter) = worklist.pop() {
        for symbol in 0..symbol_count {
            // X: all states entering the splitter block on this symbol
            touched.clear();
            for &target in &blocks[splitter] {
                for &source in &inverse[symbol][target] {
                    if !marked[source] {
                        marked[source] = true;
                        touched.push(source);
                    }
                }
            }
            if touched.is_empty() {
                continue;
            }

            let mut block_index = 0;
            while block_index < blocks.len() {
                let inside_count = blocks[block_index]
                    .iter()
                    .filter(|&&state| marked[state])
                    .count();
                if inside_count == 0 || inside_count == blocks[block_index].len() {
                    block_index += 1;
                    continue;
                }

                let (inside, outside): (Vec<usize>, Vec<usize>) = blocks[block_index]
                    .iter()
                    .partition(|&&state| marked[state]);
                let fresh = blocks.len();
                for &state in &outside {
                    class_of[state] = fresh;
                }
                blocks[block_index] = inside;
                blocks.push(outside);

                if worklist.contains(&block_index) {
                    worklist.push(fresh);
                } else if blocks[block_index].len() < blocks[fresh].len() {
                    worklist.push(block_index);
                } else {
                    worklist.push(fresh);
                }
                block_index += 1;
            }

            for &state in &touched {
                marked[state] = false;
            }
        }
    }

    Partition {
        classes: blocks.len(),
        class_of,
    }
}
