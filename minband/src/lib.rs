/*!
This library finds near-duplicate text documents with banded
[MinHash](https://en.wikipedia.org/wiki/MinHash) Locality Sensitive Hashing.

The pipeline is
* shingling raw text into word triples or character windows ([`text`])
* building a shingle presence matrix and its MinHash signatures ([`minhash`])
* splitting signatures into bands and bucketing every band ([`lsh`])
* collecting documents that share a bucket as candidates ([`lsh`])

[`search::SearchIndex`] wraps the whole pipeline to answer "which stored
documents look like this query".

## Example

 ```
 use minband::lsh::lsh;
 use minband::minhash::{jaccard, minhash};
 use minband::text::shingle;

 let corpus = [
     "A spokesperson for the Sudzo Corporation revealed today that studies have shown it is good for people to buy Sudzo products.",
     "There was a boy whos name was Jim. And all the friends were very good to him.",
     "A spokesperson for the Sudzo Corporation revealed today that studies have shown it is good for people to buy Sudzo products.",
 ];
 let shingles: Vec<Vec<String>> = corpus.iter().map(|doc| shingle(&[doc])).collect();
 let signatures = minhash(&shingles, 100).unwrap();
 let candidates = lsh(&signatures, 20).unwrap().find_candidate_pairs();

 let pair = candidates.get(0, 2).unwrap();
 assert_eq!(pair.elections, 20);
 assert_eq!(jaccard(&shingles[pair.a], &shingles[pair.b]), 1.0);
 ```

## References
[[1] Chapter 3, Mining of Massive Datasets](http://www.mmds.org)
 */

mod error;
pub mod lsh;
pub mod minhash;
pub mod search;
pub mod text;

pub use crate::error::{LshError, Result};
